// quantifier.rs - Repetition counts and greediness modes.

use std::fmt;

/// How many times the preceding element may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// Exactly once; renders as nothing.
    Once,
    /// `?`
    ZeroOrOne,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `{n}`
    Exactly(usize),
    /// `{min,max}`
    Between(usize, usize),
    /// `{min,}`
    AtLeast(usize),
    /// `{0,max}`
    AtMost(usize),
}

/// Backtracking behavior of a repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Match as much as possible, giving back on failure.
    #[default]
    Greedy,
    /// Match as little as possible (`?` suffix).
    Reluctant,
    /// Match as much as possible, never giving back (`+` suffix).
    Possessive,
}

impl Mode {
    fn suffix(self) -> &'static str {
        match self {
            Mode::Greedy => "",
            Mode::Reluctant => "?",
            Mode::Possessive => "+",
        }
    }
}

/// A repetition count plus a greediness mode.
///
/// ```
/// use rexcraft::quantifier::Quantifier;
///
/// assert_eq!(Quantifier::between(2, 4).to_string(), "{2,4}");
/// assert_eq!(Quantifier::one_or_more().reluctant().to_string(), "+?");
/// assert_eq!(Quantifier::ONCE.to_string(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantifier {
    repetition: Repetition,
    mode: Mode,
}

impl Quantifier {
    /// Exactly once, greedy. Applying it adds no token at all.
    pub const ONCE: Quantifier = Quantifier::new(Repetition::Once, Mode::Greedy);

    pub const fn new(repetition: Repetition, mode: Mode) -> Self {
        Quantifier { repetition, mode }
    }

    pub const fn once() -> Self {
        Self::ONCE
    }

    pub const fn optional() -> Self {
        Self::new(Repetition::ZeroOrOne, Mode::Greedy)
    }

    pub const fn zero_or_more() -> Self {
        Self::new(Repetition::ZeroOrMore, Mode::Greedy)
    }

    pub const fn one_or_more() -> Self {
        Self::new(Repetition::OneOrMore, Mode::Greedy)
    }

    pub const fn exactly(n: usize) -> Self {
        Self::new(Repetition::Exactly(n), Mode::Greedy)
    }

    /// Between `min` and `max` repetitions, inclusive. The bounds are not
    /// checked; the engine rejects `min > max` when the pattern compiles.
    pub const fn between(min: usize, max: usize) -> Self {
        Self::new(Repetition::Between(min, max), Mode::Greedy)
    }

    pub const fn at_least(min: usize) -> Self {
        Self::new(Repetition::AtLeast(min), Mode::Greedy)
    }

    pub const fn at_most(max: usize) -> Self {
        Self::new(Repetition::AtMost(max), Mode::Greedy)
    }

    /// Same repetition, greedy mode.
    pub const fn greedy(self) -> Self {
        Self::new(self.repetition, Mode::Greedy)
    }

    /// Same repetition, reluctant (lazy) mode.
    pub const fn reluctant(self) -> Self {
        Self::new(self.repetition, Mode::Reluctant)
    }

    /// Same repetition, possessive mode.
    pub const fn possessive(self) -> Self {
        Self::new(self.repetition, Mode::Possessive)
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// `true` for the exactly-once repetition in any mode.
    pub fn is_once(&self) -> bool {
        self.repetition == Repetition::Once
    }

    /// Render as pattern text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Quantifier {
    fn default() -> Self {
        Self::ONCE
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repetition {
            // A mode suffix on its own would turn into `?` or `+`.
            Repetition::Once => return Ok(()),
            Repetition::ZeroOrOne => f.write_str("?")?,
            Repetition::ZeroOrMore => f.write_str("*")?,
            Repetition::OneOrMore => f.write_str("+")?,
            Repetition::Exactly(n) => write!(f, "{{{}}}", n)?,
            Repetition::Between(min, max) => write!(f, "{{{},{}}}", min, max)?,
            Repetition::AtLeast(min) => write!(f, "{{{},}}", min)?,
            Repetition::AtMost(max) => write!(f, "{{0,{}}}", max)?,
        }
        f.write_str(self.mode.suffix())
    }
}
