use chrono::{DateTime, Utc};

/// Live counters shown while a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// 1-based number of the problem on screen.
    pub problem_number: usize,
    pub problem_count: usize,
    /// Answered problems as a rounded share of the session.
    pub progress_percent: u32,
    /// Running accuracy, 100 before the first answer.
    pub accuracy: u32,
    pub streak: u32,
}

/// Aggregates of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Whole-percent accuracy over answered problems.
    pub accuracy: u32,
    /// Unrounded accuracy; achievement thresholds are tested against this.
    pub exact_accuracy: f64,
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    /// Wall time per problem in seconds, one decimal.
    pub average_time_secs: f64,
    pub best_streak: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
