use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::operation::Operation;

/// Per-problem timer presets in seconds (0 disables the timer).
pub const TIMER_OPTIONS: [u32; 9] = [0, 10, 20, 30, 40, 50, 60, 120, 300];

/// Problem-count presets offered when configuring a session.
pub const PROBLEM_COUNT_OPTIONS: [u32; 5] = [5, 10, 20, 50, 100];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionConfigError {
    #[error("Please select at least one operation type.")]
    NoOperations,

    #[error("problem count must be > 0")]
    ZeroProblemCount,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Inclusive operand bounds for a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    pub min: u32,
    pub max: u32,
}

impl NumberRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Same lower bound with the upper bound clamped to `cap`.
    #[must_use]
    pub fn capped(self, cap: u32) -> Self {
        Self {
            min: self.min,
            max: self.max.min(cap),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Easy,
    Intermediate,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Beginner,
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    #[must_use]
    pub fn range(self) -> NumberRange {
        match self {
            Difficulty::Beginner => NumberRange::new(1, 10),
            Difficulty::Easy => NumberRange::new(1, 50),
            Difficulty::Intermediate => NumberRange::new(1, 100),
            Difficulty::Hard => NumberRange::new(1, 500),
            Difficulty::Expert => NumberRange::new(1, 1000),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = SessionConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SessionConfigError::UnknownDifficulty(s.to_string()))
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Validated configuration for one practice session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    operations: Vec<Operation>,
    difficulty: Difficulty,
    timer_secs: u32,
    problem_count: u32,
}

/// Unvalidated session settings as collected from the user.
#[derive(Debug, Clone, Default)]
pub struct SessionConfigDraft {
    pub operations: Vec<Operation>,
    pub difficulty: Difficulty,
    pub timer_secs: u32,
    pub problem_count: u32,
}

impl SessionConfigDraft {
    /// Validate the draft.
    ///
    /// Duplicate operations are collapsed while keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns `SessionConfigError::NoOperations` if no operation is selected,
    /// or `SessionConfigError::ZeroProblemCount` for an empty session.
    pub fn validate(self) -> Result<SessionConfig, SessionConfigError> {
        let mut operations = Vec::with_capacity(self.operations.len());
        for op in self.operations {
            if !operations.contains(&op) {
                operations.push(op);
            }
        }
        if operations.is_empty() {
            return Err(SessionConfigError::NoOperations);
        }
        if self.problem_count == 0 {
            return Err(SessionConfigError::ZeroProblemCount);
        }

        Ok(SessionConfig {
            operations,
            difficulty: self.difficulty,
            timer_secs: self.timer_secs,
            problem_count: self.problem_count,
        })
    }
}

impl SessionConfig {
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn timer_secs(&self) -> u32 {
        self.timer_secs
    }

    #[must_use]
    pub fn problem_count(&self) -> u32 {
        self.problem_count
    }

    /// Same settings restricted to a different operation set.
    ///
    /// # Errors
    ///
    /// Returns `SessionConfigError::NoOperations` if `operations` is empty.
    pub fn with_operations(
        &self,
        operations: Vec<Operation>,
    ) -> Result<SessionConfig, SessionConfigError> {
        SessionConfigDraft {
            operations,
            difficulty: self.difficulty,
            timer_secs: self.timer_secs,
            problem_count: self.problem_count,
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_operation_set() {
        let err = SessionConfigDraft {
            problem_count: 5,
            ..SessionConfigDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, SessionConfigError::NoOperations);
    }

    #[test]
    fn rejects_zero_problem_count() {
        let err = SessionConfigDraft {
            operations: vec![Operation::Addition],
            ..SessionConfigDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, SessionConfigError::ZeroProblemCount);
    }

    #[test]
    fn collapses_duplicate_operations() {
        let config = SessionConfigDraft {
            operations: vec![Operation::Sqrt, Operation::Addition, Operation::Sqrt],
            difficulty: Difficulty::Hard,
            timer_secs: 30,
            problem_count: 10,
        }
        .validate()
        .unwrap();
        assert_eq!(config.operations(), &[Operation::Sqrt, Operation::Addition]);
        assert_eq!(config.difficulty().range(), NumberRange::new(1, 500));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Expert".parse::<Difficulty>().unwrap(), Difficulty::Expert);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn capped_range_keeps_lower_bound() {
        let range = Difficulty::Expert.range().capped(30);
        assert_eq!(range, NumberRange::new(1, 30));
        assert_eq!(Difficulty::Beginner.range().capped(30), NumberRange::new(1, 10));
    }
}
