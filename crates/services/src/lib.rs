#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_view;
pub mod sessions;
pub mod sink;
pub mod stats_service;

pub use drill_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, SessionError};
pub use progress_view::{AchievementStatus, ProgressView, WelcomeView};
pub use sink::{NullSink, PracticeEvent, PracticeSink, RecordingSink};
pub use stats_service::{SESSION_HISTORY_KEY, StatsService, USER_STATS_KEY};

pub use sessions::{
    AnswerOutcome, AnswerResult, ErrorAnalysis, Feedback, PracticeLoopService, SessionReport,
    SessionService, SessionSnapshot, SessionTick,
};
