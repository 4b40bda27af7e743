use drill_core::model::{Achievement, CATALOG, SessionHistoryEntry, UserStats};

/// Sessions shown in the recent-history list.
pub const RECENT_SESSIONS: usize = 5;

/// Headline numbers on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeView {
    pub problems_solved: u32,
    /// Lifetime accuracy, 0 before the first answer.
    pub accuracy: u32,
    pub current_streak: u32,
}

impl WelcomeView {
    #[must_use]
    pub fn from_stats(stats: &UserStats) -> Self {
        Self {
            problems_solved: stats.total_problems(),
            accuracy: stats.accuracy_percent(),
            current_streak: stats.current_streak(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementStatus {
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

/// Progress screen: lifetime totals, the achievement board and recent sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub total_problems: u32,
    pub accuracy: u32,
    pub sessions_completed: usize,
    /// Whole catalog in catalog order.
    pub achievements: Vec<AchievementStatus>,
    /// Newest first.
    pub recent_sessions: Vec<SessionHistoryEntry>,
}

impl ProgressView {
    #[must_use]
    pub fn build(stats: &UserStats, history: &[SessionHistoryEntry]) -> Self {
        let achievements = CATALOG
            .iter()
            .map(|achievement| AchievementStatus {
                achievement,
                unlocked: stats.is_unlocked(achievement.id),
            })
            .collect();
        let recent_sessions = history
            .iter()
            .rev()
            .take(RECENT_SESSIONS)
            .cloned()
            .collect();
        Self {
            total_problems: stats.total_problems(),
            accuracy: stats.accuracy_percent(),
            sessions_completed: history.len(),
            achievements,
            recent_sessions,
        }
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use drill_core::model::{AchievementId, Difficulty, Operation};

    fn entry(day: u32) -> SessionHistoryEntry {
        SessionHistoryEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            accuracy: 80,
            problems_correct: 8,
            total_problems: 10,
            average_time: 4.0,
            best_streak: 5,
            operations: vec![Operation::Multiplication],
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn welcome_view_handles_fresh_stats() {
        let view = WelcomeView::from_stats(&UserStats::default());
        assert_eq!(view.problems_solved, 0);
        assert_eq!(view.accuracy, 0);
    }

    #[test]
    fn welcome_view_rounds_accuracy() {
        let stats = UserStats::from_counts(3, 2, 1, 2, Vec::new());
        let view = WelcomeView::from_stats(&stats);
        assert_eq!(view.accuracy, 67);
        assert_eq!(view.current_streak, 1);
    }

    #[test]
    fn progress_lists_recent_sessions_newest_first() {
        let history: Vec<_> = (1..=7).map(entry).collect();
        let stats = UserStats::from_counts(70, 56, 0, 9, vec![AchievementId::Problems50]);
        let view = ProgressView::build(&stats, &history);

        assert_eq!(view.sessions_completed, 7);
        let days: Vec<_> = view
            .recent_sessions
            .iter()
            .map(|e| e.date.format("%d").to_string())
            .collect();
        assert_eq!(days, vec!["07", "06", "05", "04", "03"]);
        assert_eq!(view.achievements.len(), CATALOG.len());
        assert_eq!(view.unlocked_count(), 1);
        assert!(
            view.achievements
                .iter()
                .any(|a| a.achievement.id == AchievementId::Problems50 && a.unlocked)
        );
    }
}
