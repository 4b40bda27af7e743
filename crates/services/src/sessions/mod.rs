mod progress;
mod service;
mod timer;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{SessionSnapshot, SessionSummary};
pub use service::{Advance, AnswerOutcome, Feedback, SessionService, SessionTick};
pub use timer::{ProblemTimer, TimerTick, format_remaining};
pub use view::{
    CategoryCount, ErrorAnalysis, MissedProblem, SessionReport, missed_operations,
    weak_area_config,
};
pub use workflow::{AnswerResult, PracticeLoopService};
