//! Categorizes incorrect answers.

use crate::model::{Answer, ErrorCategory, Problem, parse_numeric};

/// Answers given faster than this are attributed to time pressure.
pub const TIME_PRESSURE_THRESHOLD_MS: i64 = 3_000;

/// Categorize a wrong answer.
///
/// Rules, first match wins:
/// 1. answered in under 3 s: `TimePressureError`
/// 2. off by exactly one: `CarelessMistake`
/// 3. off by more than half the correct answer: `ConceptualError`
/// 4. otherwise: `CalculationError`
///
/// Rules 2 and 3 need a numeric distance. Symbolic answers and submissions that
/// do not parse as numbers skip them and fall through to `CalculationError`.
#[must_use]
pub fn classify(problem: &Problem, submitted: &str, elapsed_ms: i64) -> ErrorCategory {
    if elapsed_ms < TIME_PRESSURE_THRESHOLD_MS {
        return ErrorCategory::TimePressureError;
    }

    let Answer::Number(correct) = problem.answer() else {
        return ErrorCategory::CalculationError;
    };
    let Some(given) = parse_numeric(submitted) else {
        return ErrorCategory::CalculationError;
    };

    #[allow(clippy::cast_precision_loss)]
    let correct = *correct as f64;
    let diff = (given - correct).abs();

    #[allow(clippy::float_cmp)]
    let off_by_one = diff == 1.0;

    if off_by_one {
        ErrorCategory::CarelessMistake
    } else if diff > correct * 0.5 {
        ErrorCategory::ConceptualError
    } else {
        ErrorCategory::CalculationError
    }
}
