use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseOperationError {
    #[error("unknown operation: {0}")]
    Unknown(String),
}

//
// ─── OPERATION ─────────────────────────────────────────────────────────────────
//

/// Category of practice problem.
///
/// Serialized with the short identifiers used in persisted history
/// (`"sqrt"`, `"cbrt"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Square,
    Sqrt,
    Cbrt,
    Trigonometry,
}

impl Operation {
    /// Every category, in the order the settings screen lists them.
    pub const ALL: [Operation; 8] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
        Operation::Square,
        Operation::Sqrt,
        Operation::Cbrt,
        Operation::Trigonometry,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
            Operation::Multiplication => "multiplication",
            Operation::Division => "division",
            Operation::Square => "square",
            Operation::Sqrt => "sqrt",
            Operation::Cbrt => "cbrt",
            Operation::Trigonometry => "trigonometry",
        }
    }

    /// Whether problems of this category are answered by picking a symbolic option.
    #[must_use]
    pub fn is_multiple_choice(self) -> bool {
        matches!(self, Operation::Trigonometry)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "addition" | "add" => Ok(Operation::Addition),
            "subtraction" | "sub" => Ok(Operation::Subtraction),
            "multiplication" | "mul" => Ok(Operation::Multiplication),
            "division" | "div" => Ok(Operation::Division),
            "square" => Ok(Operation::Square),
            "sqrt" | "square-root" => Ok(Operation::Sqrt),
            "cbrt" | "cube-root" => Ok(Operation::Cbrt),
            "trigonometry" | "trig" => Ok(Operation::Trigonometry),
            _ => Err(ParseOperationError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_and_aliases() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert_eq!("Square-Root".parse::<Operation>().unwrap(), Operation::Sqrt);
        assert_eq!(" trig ".parse::<Operation>().unwrap(), Operation::Trigonometry);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "modulo".parse::<Operation>().unwrap_err();
        assert_eq!(err, ParseOperationError::Unknown("modulo".into()));
    }

    #[test]
    fn serializes_short_identifiers() {
        let json = serde_json::to_string(&Operation::Cbrt).unwrap();
        assert_eq!(json, "\"cbrt\"");
    }
}
