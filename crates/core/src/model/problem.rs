use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::operation::Operation;
use crate::model::trig::{AngleUnit, TrigFunction};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("problem was already answered")]
    AlreadyAnswered,
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// Correct answer of a problem: an integer, or an exact symbolic value for trigonometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(i64),
    Symbol(String),
}

impl Answer {
    #[must_use]
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Symbol(_) => None,
        }
    }

    /// Compare a trimmed user submission against this answer.
    ///
    /// Symbols compare as exact strings. Numbers compare against the submission
    /// parsed as `f64`, with no tolerance; unparsable input never matches.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        match self {
            Answer::Symbol(symbol) => symbol == submitted,
            #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
            Answer::Number(n) => parse_numeric(submitted).is_some_and(|v| v == *n as f64),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => write!(f, "{n}"),
            Answer::Symbol(s) => f.write_str(s),
        }
    }
}

/// Parse a user submission as a finite floating point number.
#[must_use]
pub fn parse_numeric(submitted: &str) -> Option<f64> {
    submitted
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

//
// ─── OPERANDS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operands {
    /// `left op right`; for division `left` is the dividend.
    Binary { left: i64, right: i64 },
    /// Base of a square, or radicand of a root.
    Unary { value: i64 },
    Trig {
        function: TrigFunction,
        unit: AngleUnit,
        degrees: u16,
    },
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A single practice problem and, once answered, the user's attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    operation: Operation,
    operands: Operands,
    answer: Answer,
    display: String,
    options: Option<Vec<String>>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    submitted: Option<String>,
    correct: bool,
}

impl Problem {
    #[must_use]
    pub fn new(
        operation: Operation,
        operands: Operands,
        answer: Answer,
        display: impl Into<String>,
        options: Option<Vec<String>>,
    ) -> Self {
        Self {
            operation,
            operands,
            answer,
            display: display.into(),
            options,
            started_at: None,
            ended_at: None,
            submitted: None,
            correct: false,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn operands(&self) -> Operands {
        self.operands
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// Expression text without the trailing `= ?`.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Prompt as shown to the user, e.g. `7 + 3 = ?`.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} = ?", self.display)
    }

    /// Multiple-choice options (trigonometry only).
    #[must_use]
    pub fn options(&self) -> Option<&[String]> {
        self.options.as_deref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// What the user submitted; `None` while unanswered or after a timeout.
    #[must_use]
    pub fn submitted(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Milliseconds between presentation and answer, when both are known.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<i64> {
        let start = self.started_at?;
        let end = self.ended_at?;
        Some(end.signed_duration_since(start).num_milliseconds())
    }

    /// Record the moment the problem was shown. Re-presenting restarts the clock.
    pub fn mark_presented(&mut self, at: DateTime<Utc>) {
        if !self.is_answered() {
            self.started_at = Some(at);
        }
    }

    /// Record the single answer this problem accepts.
    ///
    /// A `None` submission (timeout) is always incorrect.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::AlreadyAnswered` on a second attempt.
    pub fn record_answer(
        &mut self,
        submitted: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<bool, ProblemError> {
        if self.is_answered() {
            return Err(ProblemError::AlreadyAnswered);
        }
        let correct = submitted.is_some_and(|s| self.answer.matches(s));
        self.ended_at = Some(at);
        self.submitted = submitted.map(str::to_string);
        self.correct = correct;
        Ok(correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn sum(a: i64, b: i64) -> Problem {
        Problem::new(
            Operation::Addition,
            Operands::Binary { left: a, right: b },
            Answer::Number(a + b),
            format!("{a} + {b}"),
            None,
        )
    }

    #[test]
    fn numeric_answers_compare_as_floats() {
        let answer = Answer::Number(12);
        assert!(answer.matches("12"));
        assert!(answer.matches("12.0"));
        assert!(answer.matches(" 12 "));
        assert!(!answer.matches("12.5"));
        assert!(!answer.matches("twelve"));
        assert!(!answer.matches("NaN"));
    }

    #[test]
    fn symbolic_answers_compare_exactly() {
        let answer = Answer::Symbol("√3/2".into());
        assert!(answer.matches("√3/2"));
        assert!(!answer.matches("√3 / 2"));
        assert!(!answer.matches("0.866"));
    }

    #[test]
    fn records_answer_once() {
        let now = fixed_now();
        let mut problem = sum(2, 3);
        problem.mark_presented(now);
        let correct = problem
            .record_answer(Some("5"), now + chrono::Duration::milliseconds(4200))
            .unwrap();
        assert!(correct);
        assert_eq!(problem.elapsed_ms(), Some(4200));
        assert_eq!(problem.submitted(), Some("5"));

        let err = problem.record_answer(Some("6"), now).unwrap_err();
        assert_eq!(err, ProblemError::AlreadyAnswered);
        assert!(problem.is_correct());
    }

    #[test]
    fn timeout_is_incorrect() {
        let mut problem = sum(2, 3);
        problem.mark_presented(fixed_now());
        assert!(!problem.record_answer(None, fixed_now()).unwrap());
        assert!(problem.submitted().is_none());
        assert!(problem.is_answered());
    }

    #[test]
    fn prompt_appends_question_mark() {
        assert_eq!(sum(4, 4).prompt(), "4 + 4 = ?");
    }
}
