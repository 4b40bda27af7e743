use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::problem::Problem;

/// Why an answer was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    CalculationError,
    CarelessMistake,
    ConceptualError,
    TimePressureError,
}

impl ErrorCategory {
    /// Taxonomy order used when listing counts.
    pub const ALL: [ErrorCategory; 4] = [
        ErrorCategory::CalculationError,
        ErrorCategory::CarelessMistake,
        ErrorCategory::ConceptualError,
        ErrorCategory::TimePressureError,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::CalculationError => "calculation_error",
            ErrorCategory::CarelessMistake => "careless_mistake",
            ErrorCategory::ConceptualError => "conceptual_error",
            ErrorCategory::TimePressureError => "time_pressure_error",
        }
    }

    /// Human label, e.g. `Time Pressure Error`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::CalculationError => "Calculation Error",
            ErrorCategory::CarelessMistake => "Careless Mistake",
            ErrorCategory::ConceptualError => "Conceptual Error",
            ErrorCategory::TimePressureError => "Time Pressure Error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A missed problem as recorded by the session. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub problem: Problem,
    pub category: ErrorCategory,
    /// `None` when the timer expired before an answer was given.
    pub submitted: Option<String>,
}

impl ErrorRecord {
    #[must_use]
    pub fn new(problem: Problem, category: ErrorCategory, submitted: Option<String>) -> Self {
        Self {
            problem,
            category,
            submitted,
        }
    }

    /// What to show in the "your answer" column.
    #[must_use]
    pub fn submitted_label(&self) -> &str {
        self.submitted.as_deref().unwrap_or("No answer (timeout)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_title_cased_identifiers() {
        for category in ErrorCategory::ALL {
            let expected: String = category
                .as_str()
                .split('_')
                .map(|w| {
                    let mut chars = w.chars();
                    chars
                        .next()
                        .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(category.label(), expected);
        }
    }
}
