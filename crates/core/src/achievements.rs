//! Achievement unlocking against the fixed catalog.

use crate::model::{Achievement, CATALOG, Milestone, UserStats};

/// Whether `achievement`'s milestone holds.
///
/// `session_accuracy` is the percentage of the session that just completed;
/// accuracy milestones never hold without one.
#[must_use]
pub fn is_reached(achievement: &Achievement, stats: &UserStats, session_accuracy: Option<f64>) -> bool {
    match achievement.milestone {
        Milestone::SessionAccuracy(threshold) => {
            session_accuracy.is_some_and(|accuracy| accuracy >= f64::from(threshold))
        }
        Milestone::Streak(threshold) => stats.best_streak() >= threshold,
        Milestone::TotalProblems(threshold) => stats.total_problems() >= threshold,
    }
}

/// Unlock every catalog achievement whose milestone now holds.
///
/// Returns only the achievements unlocked by this call, in catalog order.
/// Calling again with the same stats returns nothing.
pub fn evaluate(stats: &mut UserStats, session_accuracy: Option<f64>) -> Vec<&'static Achievement> {
    let mut unlocked = Vec::new();
    for achievement in &CATALOG {
        if stats.is_unlocked(achievement.id) {
            continue;
        }
        if is_reached(achievement, stats, session_accuracy) && stats.unlock(achievement.id) {
            unlocked.push(achievement);
        }
    }
    unlocked
}

/// Unlock a streak achievement at the exact moment the current streak hits its threshold.
///
/// Meant to run right after a correct answer.
pub fn check_streak_milestone(stats: &mut UserStats) -> Option<&'static Achievement> {
    let streak = stats.current_streak();
    let achievement = CATALOG
        .iter()
        .find(|a| matches!(a.milestone, Milestone::Streak(threshold) if threshold == streak))?;
    stats.unlock(achievement.id).then_some(achievement)
}
