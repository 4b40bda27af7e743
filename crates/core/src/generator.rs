//! Random problem generation.
//!
//! Every random choice goes through [`Draw`], so tests can script the exact
//! sequence of picks and assert range boundaries.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::trig::{SPECIAL_ANGLES, SYMBOLIC_POOL, SpecialAngle};
use crate::model::{
    AngleUnit, Answer, NumberRange, Operands, Operation, Problem, SessionConfig, TrigFunction,
};

/// Multiplication operands never exceed this, whatever the difficulty.
pub const MULTIPLICATION_CAP: u32 = 20;
/// Divisors are drawn from `1..=DIVISOR_MAX`.
pub const DIVISOR_MAX: u32 = 12;
/// Quotients are drawn from `1..=QUOTIENT_MAX`.
pub const QUOTIENT_MAX: u32 = 20;
pub const SQUARE_CAP: u32 = 30;
pub const SQRT_CAP: u32 = 30;
pub const CBRT_CAP: u32 = 12;
/// Number of options offered for a trigonometry problem.
pub const TRIG_OPTION_COUNT: usize = 4;

const MAX_ANGLE_REDRAWS: usize = 32;

//
// ─── RANDOM SOURCE ─────────────────────────────────────────────────────────────
//

/// Source of uniform choices.
pub trait Draw {
    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    fn between(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low) as usize + 1;
        let offset = u32::try_from(self.pick(span)).unwrap_or(high - low);
        low + offset.min(high - low)
    }
}

/// [`Draw`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandDraw<R> {
    rng: R,
}

impl<R: Rng> RandDraw<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandDraw<StdRng> {
    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible sequence, for tests and property checks.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Draw for RandDraw<R> {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// [`Draw`] that replays a fixed list of picks.
///
/// Each pick is clamped to `len - 1`, so `usize::MAX` always selects the upper
/// bound. Once the script runs out every pick is 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraw {
    picks: VecDeque<usize>,
}

impl ScriptedDraw {
    #[must_use]
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Picks not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl Draw for ScriptedDraw {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0).min(len - 1)
    }
}

//
// ─── GENERATION ────────────────────────────────────────────────────────────────
//

/// Generate one problem of the given category.
pub fn generate<D: Draw + ?Sized>(operation: Operation, range: NumberRange, draw: &mut D) -> Problem {
    match operation {
        Operation::Addition => {
            let a = draw.between(range.min, range.max);
            let b = draw.between(range.min, range.max);
            binary(operation, a, b, i64::from(a) + i64::from(b), "+")
        }
        Operation::Subtraction => {
            let a = draw.between(range.min, range.max);
            let b = draw.between(range.min, a);
            binary(operation, a, b, i64::from(a) - i64::from(b), "-")
        }
        Operation::Multiplication => {
            let cap = range.max.min(MULTIPLICATION_CAP);
            let a = draw.between(1, cap);
            let b = draw.between(1, cap);
            binary(operation, a, b, i64::from(a) * i64::from(b), "×")
        }
        Operation::Division => {
            let divisor = draw.between(1, DIVISOR_MAX);
            let quotient = draw.between(1, QUOTIENT_MAX);
            let dividend = divisor * quotient;
            binary(operation, dividend, divisor, i64::from(quotient), "÷")
        }
        Operation::Square => {
            let base = i64::from(draw.between(range.min, range.capped(SQUARE_CAP).max));
            Problem::new(
                operation,
                Operands::Unary { value: base },
                Answer::Number(base * base),
                format!("{base}²"),
                None,
            )
        }
        Operation::Sqrt => {
            let root = i64::from(draw.between(range.min, range.capped(SQRT_CAP).max));
            let radicand = root * root;
            Problem::new(
                operation,
                Operands::Unary { value: radicand },
                Answer::Number(root),
                format!("√{radicand}"),
                None,
            )
        }
        Operation::Cbrt => {
            let root = i64::from(draw.between(range.min, range.capped(CBRT_CAP).max));
            let radicand = root * root * root;
            Problem::new(
                operation,
                Operands::Unary { value: radicand },
                Answer::Number(root),
                format!("∛{radicand}"),
                None,
            )
        }
        Operation::Trigonometry => trigonometry(draw),
    }
}

/// Generate a full session's problems from a validated configuration.
///
/// Each problem's category is drawn uniformly from the configured operations.
pub fn generate_for_session<D: Draw + ?Sized>(config: &SessionConfig, draw: &mut D) -> Vec<Problem> {
    let range = config.difficulty().range();
    let operations = config.operations();
    (0..config.problem_count())
        .map(|_| {
            let operation = operations[draw.pick(operations.len())];
            generate(operation, range, draw)
        })
        .collect()
}

fn binary(operation: Operation, left: u32, right: u32, answer: i64, symbol: &str) -> Problem {
    Problem::new(
        operation,
        Operands::Binary {
            left: i64::from(left),
            right: i64::from(right),
        },
        Answer::Number(answer),
        format!("{left} {symbol} {right}"),
        None,
    )
}

fn trigonometry<D: Draw + ?Sized>(draw: &mut D) -> Problem {
    let function = TrigFunction::ALL[draw.pick(TrigFunction::ALL.len())];
    let unit = if draw.pick(2) == 0 {
        AngleUnit::Degrees
    } else {
        AngleUnit::Radians
    };
    let angle = draw_angle(function, draw);
    let answer = angle.value(function);

    let mut distractors: Vec<&str> = SYMBOLIC_POOL
        .iter()
        .copied()
        .filter(|candidate| *candidate != answer)
        .collect();
    let mut options = Vec::with_capacity(TRIG_OPTION_COUNT);
    options.push(answer.to_string());
    while options.len() < TRIG_OPTION_COUNT && !distractors.is_empty() {
        let index = draw.pick(distractors.len());
        options.push(distractors.swap_remove(index).to_string());
    }
    // Fisher-Yates
    for i in (1..options.len()).rev() {
        let j = draw.pick(i + 1);
        options.swap(i, j);
    }

    Problem::new(
        Operation::Trigonometry,
        Operands::Trig {
            function,
            unit,
            degrees: angle.degrees,
        },
        Answer::Symbol(answer.to_string()),
        format!("{function}({})", angle.label(unit)),
        Some(options),
    )
}

/// Draw an angle whose value is defined for `function`.
fn draw_angle<D: Draw + ?Sized>(function: TrigFunction, draw: &mut D) -> SpecialAngle {
    let mut index = draw.pick(SPECIAL_ANGLES.len());
    for _ in 0..MAX_ANGLE_REDRAWS {
        if SPECIAL_ANGLES[index].is_defined(function) {
            return SPECIAL_ANGLES[index];
        }
        index = draw.pick(SPECIAL_ANGLES.len());
    }
    // A source that keeps landing on undefined angles walks forward instead.
    (0..SPECIAL_ANGLES.len())
        .map(|step| SPECIAL_ANGLES[(index + step) % SPECIAL_ANGLES.len()])
        .find(|angle| angle.is_defined(function))
        .unwrap_or(SPECIAL_ANGLES[0])
}
