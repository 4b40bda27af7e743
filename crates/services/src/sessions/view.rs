use drill_core::model::tips::tips_for;
use drill_core::model::{
    Achievement, ErrorCategory, Operation, SessionConfig, rounded_percent,
};

use super::progress::SessionSummary;
use super::service::SessionService;
use crate::error::SessionError;

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Results screen for a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub summary: SessionSummary,
    /// Achievements first unlocked by this session, including streak unlocks
    /// that fired mid-session.
    pub new_achievements: Vec<&'static Achievement>,
}

impl SessionReport {
    /// `correct/total`, e.g. `8/10`.
    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.summary.correct, self.summary.total)
    }

    /// Average seconds per problem, e.g. `3.5s`.
    #[must_use]
    pub fn average_time_label(&self) -> String {
        format!("{:.1}s", self.summary.average_time_secs)
    }
}

//
// ─── ERROR ANALYSIS ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: ErrorCategory,
    pub count: usize,
}

impl CategoryCount {
    /// e.g. `Careless Mistake: 2 errors`.
    #[must_use]
    pub fn label(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!(
            "{}: {} error{plural}",
            self.category.label(),
            self.count
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedProblem {
    /// `display = answer`, e.g. `7 × 8 = 56`.
    pub solution: String,
    pub your_answer: String,
}

/// Breakdown of the misses of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAnalysis {
    pub total_errors: usize,
    /// Misses as a rounded share of all problems in the session.
    pub error_rate: u32,
    /// Non-zero categories in taxonomy order.
    pub categories: Vec<CategoryCount>,
    pub missed: Vec<MissedProblem>,
    /// Tips for every missed operation, in first-miss order.
    pub tips: Vec<&'static str>,
}

impl ErrorAnalysis {
    #[must_use]
    pub fn for_session(session: &SessionService) -> Self {
        let errors = session.errors();
        let total = u32::try_from(session.problems().len()).unwrap_or(u32::MAX);
        let total_errors = errors.len();

        let categories = ErrorCategory::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: errors.iter().filter(|e| e.category == category).count(),
            })
            .filter(|c| c.count > 0)
            .collect();

        let missed = errors
            .iter()
            .map(|e| MissedProblem {
                solution: format!("{} = {}", e.problem.display(), e.problem.answer()),
                your_answer: e.submitted_label().to_string(),
            })
            .collect();

        let tips = missed_operations(session)
            .into_iter()
            .flat_map(|op| tips_for(op).iter().copied())
            .collect();

        Self {
            total_errors,
            error_rate: rounded_percent(
                u32::try_from(total_errors).unwrap_or(u32::MAX),
                total,
            )
            .unwrap_or(0),
            categories,
            missed,
            tips,
        }
    }
}

/// Distinct operations of missed problems, in first-miss order.
#[must_use]
pub fn missed_operations(session: &SessionService) -> Vec<Operation> {
    let mut operations = Vec::new();
    for error in session.errors() {
        let op = error.problem.operation();
        if !operations.contains(&op) {
            operations.push(op);
        }
    }
    operations
}

/// Configuration for a follow-up session drilling only the missed operations.
///
/// # Errors
///
/// Returns `SessionError::NoErrorsToPractice` when the session had no misses.
pub fn weak_area_config(session: &SessionService) -> Result<SessionConfig, SessionError> {
    let operations = missed_operations(session);
    if operations.is_empty() {
        return Err(SessionError::NoErrorsToPractice);
    }
    Ok(session.config().with_operations(operations)?)
}
