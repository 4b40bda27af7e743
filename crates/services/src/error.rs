//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{ProblemError, SessionConfigError};
use storage::sqlite::SqliteInitError;

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] SessionConfigError),
    #[error("Please enter an answer.")]
    EmptyAnswer,
    #[error("session already completed")]
    Completed,
    #[error("current problem has not been presented")]
    NotPresented,
    #[error("current problem has not been answered")]
    NotAnswered,
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error("No errors to practice!")]
    NoErrorsToPractice,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
