use thiserror::Error;

use crate::model::{ParseOperationError, ProblemError, SessionConfigError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] SessionConfigError),
    #[error(transparent)]
    Operation(#[from] ParseOperationError),
    #[error(transparent)]
    Problem(#[from] ProblemError),
}
