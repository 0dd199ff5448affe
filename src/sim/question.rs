//! Question generation
//!
//! Pure functions from (level, random draws) to a `Question`. Operand ranges
//! per level:
//! - Level 1: fruit word problem (1-5 each) or `+`/`-` over 1-20
//! - Level 2: one of `+`/`-` over 1-50, `×` over 1-10, exact `÷`
//! - Level 3: `a+b+c`, `a+b-c` or `(a+b)×c`
//!
//! Subtractions put the larger operand first so the result is never negative.
//! Level-3 `a+b-c` is only biased towards a non-negative result by its
//! ranges; it is not clamped.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Level {
    #[default]
    One,
    Two,
    Three,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::One, Level::Two, Level::Three];

    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }

    /// The next tier up, or `None` at the top
    pub fn next(self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => Some(Level::Three),
            Level::Three => None,
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.number()
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            other => Err(format!("level must be 1, 2 or 3, got {other}")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Arithmetic template with its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Sum(i32, i32),
    /// Minuend first; built through `Expression::difference`
    Difference(i32, i32),
    Product(i32, i32),
    Quotient { dividend: i32, divisor: i32 },
    /// Level-1 word problem: count the pears and apples
    FruitCount { pears: i32, apples: i32 },
    Sum3(i32, i32, i32),
    SumThenDifference(i32, i32, i32),
    /// `(a + b) × factor`
    ScaledSum { a: i32, b: i32, factor: i32 },
}

impl Expression {
    /// Subtraction with the larger operand first
    pub fn difference(a: i32, b: i32) -> Self {
        if b > a {
            Expression::Difference(b, a)
        } else {
            Expression::Difference(a, b)
        }
    }

    pub fn value(&self) -> i32 {
        match *self {
            Expression::Sum(a, b) => a + b,
            Expression::Difference(a, b) => a - b,
            Expression::Product(a, b) => a * b,
            Expression::Quotient { dividend, divisor } => dividend / divisor,
            Expression::FruitCount { pears, apples } => pears + apples,
            Expression::Sum3(a, b, c) => a + b + c,
            Expression::SumThenDifference(a, b, c) => a + b - c,
            Expression::ScaledSum { a, b, factor } => (a + b) * factor,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Expression::Sum(a, b) => write!(f, "{a} + {b}"),
            Expression::Difference(a, b) => write!(f, "{a} - {b}"),
            Expression::Product(a, b) => write!(f, "{a} × {b}"),
            Expression::Quotient { dividend, divisor } => write!(f, "{dividend} ÷ {divisor}"),
            Expression::FruitCount { pears, apples } => write!(f, "{pears} + {apples}"),
            Expression::Sum3(a, b, c) => write!(f, "{a} + {b} + {c}"),
            Expression::SumThenDifference(a, b, c) => write!(f, "{a} + {b} - {c}"),
            Expression::ScaledSum { a, b, factor } => write!(f, "({a} + {b}) × {factor}"),
        }
    }
}

/// Comparison sign in a truth question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    Less,
    Greater,
    Equal,
}

impl Comparator {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Less => "<",
            Comparator::Greater => ">",
            Comparator::Equal => "=",
        }
    }

    pub fn evaluate(self, left: i32, right: i32) -> bool {
        match self {
            Comparator::Less => left < right,
            Comparator::Greater => left > right,
            Comparator::Equal => left == right,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `left <comparator> right`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: Expression,
    pub comparator: Comparator,
    pub right: i32,
}

impl Comparison {
    /// Whether the comparison is true
    pub fn holds(&self) -> bool {
        self.comparator.evaluate(self.left.value(), self.right)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.comparator, self.right)
    }
}

/// Which input the presentation layer should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Free-form integer entry
    Numeric,
    /// Yes/no buttons
    BooleanTruth,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Numeric => f.write_str("numeric"),
            QuestionKind::BooleanTruth => f.write_str("yes/no"),
        }
    }
}

/// One round's prompt and its expected answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Question {
    Numeric {
        text: String,
        expression: Expression,
        answer: i32,
    },
    BooleanTruth {
        text: String,
        comparison: Comparison,
        answer: bool,
    },
}

impl Question {
    fn numeric(expression: Expression) -> Self {
        let text = match expression {
            Expression::FruitCount { pears, apples } => {
                format!("{pears} pears + {apples} apples. How many fruits in total?")
            }
            _ => format!("{expression} = ?"),
        };
        Question::Numeric {
            text,
            answer: expression.value(),
            expression,
        }
    }

    fn boolean(comparison: Comparison) -> Self {
        Question::BooleanTruth {
            text: format!("{comparison} ?"),
            answer: comparison.holds(),
            comparison,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Question::Numeric { text, .. } | Question::BooleanTruth { text, .. } => text,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Question::Numeric { .. } => QuestionKind::Numeric,
            Question::BooleanTruth { .. } => QuestionKind::BooleanTruth,
        }
    }

    /// Canonical answer as shown to the player
    pub fn correct_answer_text(&self) -> String {
        match self {
            Question::Numeric { answer, .. } => answer.to_string(),
            Question::BooleanTruth { answer, .. } => yes_no(*answer).to_string(),
        }
    }
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Weighted coin: ¾ numeric on level 1, even split above
pub fn roll_numeric(level: Level, rng: &mut impl RandomSource) -> bool {
    match level {
        Level::One => rng.next_int(4) != 0,
        Level::Two | Level::Three => rng.next_bool(),
    }
}

/// Pick the question type for `level`, then generate it
pub fn generate_question(level: Level, rng: &mut impl RandomSource) -> Question {
    if roll_numeric(level, rng) {
        generate_numeric(level, rng)
    } else {
        generate_boolean(level, rng)
    }
}

/// Generate a question with an integer answer
pub fn generate_numeric(level: Level, rng: &mut impl RandomSource) -> Question {
    let expression = match level {
        Level::One => {
            if rng.next_bool() {
                let pears = rng.next_in(1, 5);
                let apples = rng.next_in(1, 5);
                Expression::FruitCount { pears, apples }
            } else {
                sum_or_difference(rng, 20)
            }
        }
        Level::Two => single_operation(rng),
        Level::Three => match rng.next_int(3) {
            0 => {
                let a = rng.next_in(1, 50);
                let b = rng.next_in(1, 50);
                let c = rng.next_in(1, 50);
                Expression::Sum3(a, b, c)
            }
            1 => {
                let a = rng.next_in(20, 60);
                let b = rng.next_in(1, 40);
                let c = rng.next_in(1, 40);
                Expression::SumThenDifference(a, b, c)
            }
            _ => {
                let a = rng.next_in(1, 10);
                let b = rng.next_in(1, 10);
                let factor = rng.next_in(2, 5);
                Expression::ScaledSum { a, b, factor }
            }
        },
    };
    Question::numeric(expression)
}

/// Generate a yes/no question about a comparison
pub fn generate_boolean(level: Level, rng: &mut impl RandomSource) -> Question {
    let left = match level {
        Level::One => sum_or_difference(rng, 20),
        Level::Two => single_operation(rng),
        Level::Three => {
            let a = rng.next_in(1, 50);
            let b = rng.next_in(1, 50);
            let c = rng.next_in(1, 30);
            if rng.next_bool() {
                Expression::Sum3(a, b, c)
            } else {
                Expression::SumThenDifference(a, b, c)
            }
        }
    };

    let comparator = match rng.next_int(3) {
        0 => Comparator::Less,
        1 => Comparator::Greater,
        _ => Comparator::Equal,
    };
    let should_hold = rng.next_bool();
    let right = right_hand_side(left.value(), comparator, should_hold, rng);

    let comparison = Comparison {
        left,
        comparator,
        right,
    };
    debug_assert_eq!(comparison.holds(), should_hold);
    Question::boolean(comparison)
}

/// `a ± b` with both operands in `1..=max`
fn sum_or_difference(rng: &mut impl RandomSource, max: u32) -> Expression {
    let a = rng.next_in(1, max);
    let b = rng.next_in(1, max);
    if rng.next_bool() {
        Expression::Sum(a, b)
    } else {
        Expression::difference(a, b)
    }
}

/// Level-2 template: one of `+ - × ÷`, division always exact
fn single_operation(rng: &mut impl RandomSource) -> Expression {
    match rng.next_int(4) {
        0 => {
            let a = rng.next_in(1, 50);
            let b = rng.next_in(1, 50);
            Expression::Sum(a, b)
        }
        1 => {
            let a = rng.next_in(1, 50);
            let b = rng.next_in(1, 50);
            Expression::difference(a, b)
        }
        2 => {
            let a = rng.next_in(1, 10);
            let b = rng.next_in(1, 10);
            Expression::Product(a, b)
        }
        _ => {
            let divisor = rng.next_in(2, 9);
            let quotient = rng.next_in(1, 10);
            Expression::Quotient {
                dividend: divisor * quotient,
                divisor,
            }
        }
    }
}

/// Pick `right` so that `left <comparator> right` evaluates to `should_hold`.
///
/// Right-hand values are kept non-negative where the truth value allows it.
/// A `>` that must hold against a left side of 0 or below keeps the negative
/// `left - delta`, since clamping to 0 would make it false.
fn right_hand_side(
    left: i32,
    comparator: Comparator,
    should_hold: bool,
    rng: &mut impl RandomSource,
) -> i32 {
    match (comparator, should_hold) {
        (Comparator::Less, true) => left + rng.next_in(1, 10),
        (Comparator::Less, false) => {
            if rng.next_bool() {
                left
            } else {
                let right = left - rng.next_in(1, 10);
                if right < 0 { left } else { right }
            }
        }
        (Comparator::Greater, true) => {
            let right = left - rng.next_in(1, 10);
            if right < 0 && left > 0 { 0 } else { right }
        }
        (Comparator::Greater, false) => {
            if rng.next_bool() {
                left
            } else {
                left + rng.next_in(1, 10)
            }
        }
        (Comparator::Equal, true) => left,
        (Comparator::Equal, false) => {
            let delta = rng.next_in(1, 5);
            if rng.next_bool() || left - delta < 0 {
                left + delta
            } else {
                left - delta
            }
        }
    }
}
