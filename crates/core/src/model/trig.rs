use serde::{Deserialize, Serialize};
use std::fmt;

/// Value stored in the table where a function has no finite result.
pub const UNDEFINED: &str = "undefined";

/// Symbolic values drawn from when building distractor options.
pub const SYMBOLIC_POOL: [&str; 13] = [
    "0", "1/2", "√2/2", "√3/2", "1", "-1/2", "-√2/2", "-√3/2", "-1", "√3/3", "√3", "-√3/3", "-√3",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
}

impl TrigFunction {
    pub const ALL: [TrigFunction; 3] = [TrigFunction::Sin, TrigFunction::Cos, TrigFunction::Tan];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TrigFunction::Sin => "sin",
            TrigFunction::Cos => "cos",
            TrigFunction::Tan => "tan",
        }
    }
}

impl fmt::Display for TrigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// One canonical angle with its exact symbolic function values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialAngle {
    pub degrees: u16,
    pub radians: &'static str,
    pub sin: &'static str,
    pub cos: &'static str,
    pub tan: &'static str,
}

impl SpecialAngle {
    #[must_use]
    pub fn value(&self, function: TrigFunction) -> &'static str {
        match function {
            TrigFunction::Sin => self.sin,
            TrigFunction::Cos => self.cos,
            TrigFunction::Tan => self.tan,
        }
    }

    #[must_use]
    pub fn is_defined(&self, function: TrigFunction) -> bool {
        self.value(function) != UNDEFINED
    }

    /// Angle label in the requested unit, e.g. `30°` or `π/6`.
    #[must_use]
    pub fn label(&self, unit: AngleUnit) -> String {
        match unit {
            AngleUnit::Degrees => format!("{}°", self.degrees),
            AngleUnit::Radians => self.radians.to_string(),
        }
    }
}

const fn angle(
    degrees: u16,
    radians: &'static str,
    sin: &'static str,
    cos: &'static str,
    tan: &'static str,
) -> SpecialAngle {
    SpecialAngle {
        degrees,
        radians,
        sin,
        cos,
        tan,
    }
}

/// Special angles from 0° to 360°.
pub const SPECIAL_ANGLES: [SpecialAngle; 17] = [
    angle(0, "0", "0", "1", "0"),
    angle(30, "π/6", "1/2", "√3/2", "√3/3"),
    angle(45, "π/4", "√2/2", "√2/2", "1"),
    angle(60, "π/3", "√3/2", "1/2", "√3"),
    angle(90, "π/2", "1", "0", UNDEFINED),
    angle(120, "2π/3", "√3/2", "-1/2", "-√3"),
    angle(135, "3π/4", "√2/2", "-√2/2", "-1"),
    angle(150, "5π/6", "1/2", "-√3/2", "-√3/3"),
    angle(180, "π", "0", "-1", "0"),
    angle(210, "7π/6", "-1/2", "√3/2", "√3/3"),
    angle(225, "5π/4", "-√2/2", "-√2/2", "1"),
    angle(240, "4π/3", "-√3/2", "-1/2", "√3"),
    angle(270, "3π/2", "-1", "0", UNDEFINED),
    angle(300, "5π/3", "-√3/2", "1/2", "-√3"),
    angle(315, "7π/4", "-√2/2", "√2/2", "-1"),
    angle(330, "11π/6", "-1/2", "√3/2", "-√3/3"),
    angle(360, "2π", "0", "1", "0"),
];
