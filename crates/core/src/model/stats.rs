use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::achievement::AchievementId;
use crate::model::operation::Operation;
use crate::model::settings::Difficulty;

//
// ─── USER STATS ────────────────────────────────────────────────────────────────
//

/// Lifetime counters persisted between runs.
///
/// The serialized shape uses camelCase keys so blobs written by the browser
/// build of the trainer load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    total_problems: u32,
    total_correct: u32,
    current_streak: u32,
    best_streak: u32,
    achievements_unlocked: Vec<AchievementId>,
}

impl UserStats {
    #[must_use]
    pub fn total_problems(&self) -> u32 {
        self.total_problems
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    /// Unlocked ids in unlock order.
    #[must_use]
    pub fn achievements_unlocked(&self) -> &[AchievementId] {
        &self.achievements_unlocked
    }

    #[must_use]
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievements_unlocked.contains(&id)
    }

    /// Lifetime accuracy rounded to a whole percent; 0 before any answer.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        rounded_percent(self.total_correct, self.total_problems).unwrap_or(0)
    }

    /// Count one answered (or timed out) problem.
    pub fn record_answer(&mut self, correct: bool) {
        self.total_problems = self.total_problems.saturating_add(1);
        if correct {
            self.total_correct = self.total_correct.saturating_add(1);
            self.current_streak = self.current_streak.saturating_add(1);
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Mark an achievement unlocked. Returns `false` if it already was.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.achievements_unlocked.push(id);
        true
    }

    /// Restore invariants on data loaded from storage.
    ///
    /// Drops duplicate achievement ids and lifts `best_streak` / `total_problems`
    /// so they are never below `current_streak` / `total_correct`.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.achievements_unlocked.len());
        self.achievements_unlocked.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        self.best_streak = self.best_streak.max(self.current_streak);
        self.total_problems = self.total_problems.max(self.total_correct);
        self
    }

    /// Rebuild stats from raw counters, e.g. for fixtures or migrations.
    #[must_use]
    pub fn from_counts(
        total_problems: u32,
        total_correct: u32,
        current_streak: u32,
        best_streak: u32,
        achievements_unlocked: Vec<AchievementId>,
    ) -> Self {
        Self {
            total_problems,
            total_correct,
            current_streak,
            best_streak,
            achievements_unlocked,
        }
        .normalized()
    }
}

//
// ─── SESSION HISTORY ───────────────────────────────────────────────────────────
//

/// Summary of one completed session, appended to the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHistoryEntry {
    pub date: NaiveDate,
    /// Whole-percent accuracy.
    pub accuracy: u32,
    pub problems_correct: u32,
    pub total_problems: u32,
    /// Seconds per problem, rounded to one decimal.
    pub average_time: f64,
    pub best_streak: u32,
    pub operations: Vec<Operation>,
    pub difficulty: Difficulty,
}

/// `part / whole` as an unrounded percentage, `None` when `whole` is zero.
#[must_use]
pub fn percent(part: u32, whole: u32) -> Option<f64> {
    if whole == 0 {
        return None;
    }
    Some(f64::from(part) * 100.0 / f64::from(whole))
}

/// `part / whole` as a rounded percentage, `None` when `whole` is zero.
#[must_use]
pub fn rounded_percent(part: u32, whole: u32) -> Option<u32> {
    let pct = percent(part, whole)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = pct.round() as u32;
    Some(rounded)
}
