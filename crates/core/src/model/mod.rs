mod achievement;
mod error_category;
mod operation;
mod problem;
mod settings;
mod stats;
pub mod tips;
pub mod trig;

pub use achievement::{Achievement, AchievementId, CATALOG, Milestone};
pub use error_category::{ErrorCategory, ErrorRecord};
pub use operation::{Operation, ParseOperationError};
pub use problem::{Answer, Operands, Problem, ProblemError, parse_numeric};
pub use settings::{
    Difficulty, NumberRange, PROBLEM_COUNT_OPTIONS, SessionConfig, SessionConfigDraft,
    SessionConfigError, TIMER_OPTIONS,
};
pub use stats::{SessionHistoryEntry, UserStats, percent, rounded_percent};
pub use trig::{AngleUnit, SpecialAngle, TrigFunction};
