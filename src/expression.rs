// expression.rs - The pattern expression builder.
//
// An Expression holds fragment text that only ever grows, plus a set of
// flags that are applied when the pattern is rendered or compiled. Every
// builder method takes `self` by value and returns the extended value, so
// an expression that has been built on cannot be observed again; clone it
// first to branch.

use std::fmt;
use std::sync::OnceLock;

use bitflags::bitflags;
use log::trace;

use crate::char_set::{CharacterSet, LetterCase};
use crate::error::Result;
use crate::escape::escape;
use crate::extract::{extract, CaptureMap};
use crate::group::GroupKind;
use crate::matcher::Matcher;
use crate::quantifier::Quantifier;

bitflags! {
    /// Options applied at render and compile time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        /// Prefix the rendered pattern with `^`.
        const START_ANCHORED = 1;
        /// Suffix the rendered pattern with `$`.
        const END_ANCHORED = 1 << 1;
        /// Compile case-insensitively.
        const IGNORE_CASE = 1 << 2;
        /// `^` and `$` match only at the ends of the input, not at every line.
        const SINGLE_LINE = 1 << 3;
    }
}

const LINE_BREAKS: [&str; 4] = [r"\r\r", r"\r\n", r"\r", r"\n"];

/// A composable regular-expression pattern.
///
/// # Examples
///
/// ```
/// use rexcraft::prelude::*;
///
/// let re = Expression::new()
///     .start_of_line(true)
///     .literal("ab", Quantifier::between(1, 2))
///     .digit(Quantifier::one_or_more())
///     .end_of_line(true);
/// assert_eq!(re.render(), r"^(?:ab){1,2}\d+$");
/// assert!(re.has_match("abab42").unwrap());
/// assert!(!re.has_match("ab").unwrap());
/// ```
#[derive(Clone, Default)]
pub struct Expression {
    text: String,
    flags: Flags,
    compiled: OnceLock<Matcher>,
}

impl Expression {
    /// An empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// An expression seeded with `fragment`, taken verbatim.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Expression {
            text: fragment.into(),
            ..Self::default()
        }
    }

    /// The fragment text, without anchors.
    pub fn fragment(&self) -> &str {
        &self.text
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The final pattern text: fragment plus anchors.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 2);
        if self.flags.contains(Flags::START_ANCHORED) {
            out.push('^');
        }
        out.push_str(&self.text);
        if self.flags.contains(Flags::END_ANCHORED) {
            out.push('$');
        }
        out
    }

    // === Fragments ===

    /// Append `text` literally.
    ///
    /// A multi-character literal with a quantity other than once is
    /// wrapped in a non-capturing group so the quantity covers all of it.
    pub fn literal(self, text: &str, quantity: Quantifier) -> Self {
        let escaped = escape(text);
        if text.chars().count() == 1 || quantity == Quantifier::ONCE {
            self.push(&escaped).push_quantifier(quantity)
        } else {
            self.group(Expression::raw(escaped), GroupKind::NonCapturing, quantity)
        }
    }

    /// Append fragment text verbatim, without escaping.
    pub fn append_raw(self, fragment: &str) -> Self {
        self.push(fragment)
    }

    pub fn character_set(self, set: &CharacterSet, quantity: Quantifier) -> Self {
        self.push(&set.render()).push_quantifier(quantity)
    }

    /// A word character. Like every shorthand class this is Unicode-aware,
    /// so letters and digits from any script match.
    pub fn word_char(self, quantity: Quantifier) -> Self {
        self.token(r"\w", quantity)
    }

    pub fn non_word_char(self, quantity: Quantifier) -> Self {
        self.token(r"\W", quantity)
    }

    /// A decimal digit from any script, e.g. `'٣'` (U+0663) as well as
    /// `'3'`. Use [`CharacterSet::digits`] for ASCII `0-9` only.
    pub fn digit(self, quantity: Quantifier) -> Self {
        self.token(r"\d", quantity)
    }

    pub fn non_digit(self, quantity: Quantifier) -> Self {
        self.token(r"\D", quantity)
    }

    /// An ASCII letter of the given case.
    pub fn letter(self, case: LetterCase, quantity: Quantifier) -> Self {
        let class = format!("[{}]", case.ranges());
        self.token(&class, quantity)
    }

    /// Anything except an ASCII letter of the given case.
    pub fn non_letter(self, case: LetterCase, quantity: Quantifier) -> Self {
        let class = format!("[^{}]", case.ranges());
        self.token(&class, quantity)
    }

    /// Any character except a line feed.
    pub fn any_char(self, quantity: Quantifier) -> Self {
        self.token(".", quantity)
    }

    pub fn tab(self, quantity: Quantifier) -> Self {
        self.token(r"\t", quantity)
    }

    /// Unicode whitespace, including e.g. U+00A0 NO-BREAK SPACE.
    pub fn whitespace(self, quantity: Quantifier) -> Self {
        self.token(r"\s", quantity)
    }

    pub fn non_whitespace(self, quantity: Quantifier) -> Self {
        self.token(r"\S", quantity)
    }

    pub fn word_boundary(self) -> Self {
        self.push(r"\b")
    }

    pub fn non_word_boundary(self) -> Self {
        self.push(r"\B")
    }

    /// A line break, matching `\r\n` as one unit.
    pub fn line_break(self, quantity: Quantifier) -> Self {
        let alternatives: Vec<Expression> =
            LINE_BREAKS.iter().map(|alt| Expression::raw(*alt)).collect();
        self.or(&alternatives, quantity)
    }

    /// Wrap `expr` in a group of the given kind. `expr` is rendered with its
    /// own anchors; its other flags are ignored.
    pub fn group(self, expr: Expression, kind: GroupKind, quantity: Quantifier) -> Self {
        let inner = format!("({}{})", kind, expr.render());
        self.push(&inner).push_quantifier(quantity)
    }

    /// Any one of `alternatives`, tried in order.
    pub fn or(self, alternatives: &[Expression], quantity: Quantifier) -> Self {
        let joined = alternatives
            .iter()
            .map(Expression::render)
            .collect::<Vec<_>>()
            .join("|");
        self.group(Expression::raw(joined), GroupKind::NonCapturing, quantity)
    }

    // === Flags ===

    pub fn start_of_line(self, enable: bool) -> Self {
        self.set_flag(Flags::START_ANCHORED, enable)
    }

    pub fn end_of_line(self, enable: bool) -> Self {
        self.set_flag(Flags::END_ANCHORED, enable)
    }

    pub fn ignore_case(self, enable: bool) -> Self {
        self.set_flag(Flags::IGNORE_CASE, enable)
    }

    /// Let `^` and `$` match at every line boundary. On by default.
    pub fn multiline(self, enable: bool) -> Self {
        self.set_flag(Flags::SINGLE_LINE, !enable)
    }

    /// Let `^` and `$` match only at the ends of the input.
    pub fn search_first_line_only(self, enable: bool) -> Self {
        self.multiline(!enable)
    }

    // === Matching ===

    /// Compile the rendered pattern with this expression's flags.
    ///
    /// The compiled matcher is cached until the expression is extended.
    pub fn compile(&self) -> Result<Matcher> {
        self.with_matcher(|m| Ok(m.clone()))
    }

    /// `true` if the pattern matches anywhere in `text`.
    pub fn has_match(&self, text: &str) -> Result<bool> {
        self.with_matcher(|m| m.is_match(text))
    }

    /// The first matched substring, if any.
    pub fn find_first(&self, text: &str) -> Result<Option<String>> {
        self.with_matcher(|m| Ok(m.find(text)?.map(|found| found.as_str().to_string())))
    }

    /// Every non-overlapping matched substring.
    pub fn find_all(&self, text: &str) -> Result<Vec<String>> {
        self.find_all_from(text, 0)
    }

    /// Every non-overlapping matched substring at or after byte offset `start`.
    pub fn find_all_from(&self, text: &str, start: usize) -> Result<Vec<String>> {
        self.with_matcher(|m| {
            m.find_iter_at(text, start)
                .map(|found| found.map(|f| f.as_str().to_string()))
                .collect()
        })
    }

    /// Captured groups of every occurrence, merged into one map.
    ///
    /// Named groups are keyed by name and keep the last occurrence's value.
    /// Without named groups, keys are "0", "1", ... in insertion order
    /// across all occurrences.
    pub fn captures(&self, text: &str) -> Result<CaptureMap> {
        self.with_matcher(|m| {
            let occurrences = m.captures_iter(text).collect::<Result<Vec<_>>>()?;
            Ok(extract(occurrences))
        })
    }

    /// Captured groups of the first occurrence only.
    pub fn first_captures(&self, text: &str) -> Result<CaptureMap> {
        self.with_matcher(|m| Ok(extract(m.captures(text)?)))
    }

    /// Replace every match with `replacement`, taken literally.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String> {
        self.with_matcher(|m| {
            let mut out = String::with_capacity(text.len());
            let mut last = 0;
            for found in m.find_iter(text) {
                let found = found?;
                out.push_str(&text[last..found.start()]);
                out.push_str(replacement);
                last = found.end();
            }
            out.push_str(&text[last..]);
            Ok(out)
        })
    }

    /// Remove every match.
    pub fn remove_all(&self, text: &str) -> Result<String> {
        self.replace_all(text, "")
    }

    // === Internals ===

    fn build_matcher(&self) -> Result<Matcher> {
        Matcher::builder(&self.render())
            .case_insensitive(self.flags.contains(Flags::IGNORE_CASE))
            .multi_line(!self.flags.contains(Flags::SINGLE_LINE))
            .build()
    }

    fn with_matcher<T>(&self, f: impl FnOnce(&Matcher) -> Result<T>) -> Result<T> {
        let matcher = match self.compiled.get() {
            Some(matcher) => {
                trace!("reusing compiled pattern {:?}", matcher.source());
                matcher
            }
            // A racing thread may fill the slot first; both builds are equal.
            None => {
                let built = self.build_matcher()?;
                self.compiled.get_or_init(|| built)
            }
        };
        f(matcher)
    }

    fn token(self, token: &str, quantity: Quantifier) -> Self {
        self.push(token).push_quantifier(quantity)
    }

    fn push_quantifier(self, quantity: Quantifier) -> Self {
        if quantity.is_once() {
            return self;
        }
        self.push(&quantity.render())
    }

    fn push(mut self, fragment: &str) -> Self {
        self.text.push_str(fragment);
        self.compiled = OnceLock::new();
        self
    }

    fn set_flag(mut self, flag: Flags, enable: bool) -> Self {
        self.flags.set(flag, enable);
        self.compiled = OnceLock::new();
        self
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("text", &self.text)
            .field("flags", &self.flags)
            .finish()
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.flags == other.flags
    }
}

impl Eq for Expression {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_expression() {
        let re = Expression::new();
        assert_eq!(re.render(), "");
        assert_eq!(re.flags(), Flags::empty());
    }

    #[test]
    fn raw_seed_is_verbatim() {
        assert_eq!(Expression::raw(r"a.b").render(), r"a.b");
        assert_eq!(Expression::new().append_raw("(x)").render(), "(x)");
    }

    #[test]
    fn literal_is_escaped() {
        let re = Expression::new().literal("1+1", Quantifier::ONCE);
        assert_eq!(re.fragment(), r"1\+1");
    }

    #[test]
    fn single_char_literal_takes_quantifier_directly() {
        let re = Expression::new().literal("a", Quantifier::exactly(3));
        assert_eq!(re.render(), "a{3}");
        let re = Expression::new().literal(".", Quantifier::one_or_more());
        assert_eq!(re.render(), r"\.+");
    }

    #[test]
    fn multi_char_literal_is_grouped() {
        let re = Expression::new().literal("abc", Quantifier::exactly(3));
        assert_eq!(re.render(), "(?:abc){3}");
        let re = Expression::new().literal("a.c", Quantifier::zero_or_more().reluctant());
        assert_eq!(re.render(), r"(?:a\.c)*?");
    }

    #[test]
    fn once_in_other_mode_still_groups() {
        let re = Expression::new().literal("ab", Quantifier::ONCE.reluctant());
        assert_eq!(re.render(), "(?:ab)");
    }

    #[test]
    fn special_tokens() {
        let q = Quantifier::ONCE;
        let re = Expression::new()
            .word_char(q)
            .non_word_char(q)
            .digit(q)
            .non_digit(q)
            .any_char(q)
            .tab(q)
            .whitespace(q)
            .non_whitespace(q)
            .word_boundary()
            .non_word_boundary();
        assert_eq!(re.render(), r"\w\W\d\D.\t\s\S\b\B");
    }

    #[test]
    fn letter_classes() {
        let re = Expression::new()
            .letter(LetterCase::Lower, Quantifier::ONCE)
            .letter(LetterCase::Upper, Quantifier::optional())
            .letter(LetterCase::Both, Quantifier::one_or_more())
            .non_letter(LetterCase::Both, Quantifier::ONCE);
        assert_eq!(re.render(), "[a-z][A-Z]?[a-zA-Z]+[^a-zA-Z]");
    }

    #[test]
    fn character_set_with_quantifier() {
        let set = CharacterSet::include().digits();
        let re = Expression::new().character_set(&set, Quantifier::between(2, 4));
        assert_eq!(re.render(), "[0-9]{2,4}");
    }

    #[test]
    fn line_break_alternatives_in_order() {
        let re = Expression::new().line_break(Quantifier::ONCE);
        assert_eq!(re.render(), r"(?:\r\r|\r\n|\r|\n)");
    }

    #[test]
    fn group_kinds() {
        let inner = || Expression::new().digit(Quantifier::ONCE);
        let q = Quantifier::ONCE;
        assert_eq!(
            Expression::new().group(inner(), GroupKind::Capturing, q).render(),
            r"(\d)"
        );
        assert_eq!(
            Expression::new().group(inner(), GroupKind::named("n"), q).render(),
            r"(?<n>\d)"
        );
        assert_eq!(
            Expression::new()
                .group(inner(), GroupKind::NegativeLookBehind, q)
                .render(),
            r"(?<!\d)"
        );
        assert_eq!(
            Expression::new()
                .group(inner(), GroupKind::NonCapturing, Quantifier::at_most(2))
                .render(),
            r"(?:\d){0,2}"
        );
    }

    #[test]
    fn or_joins_alternatives() {
        let re = Expression::new().or(
            &[
                Expression::new().literal("cat", Quantifier::ONCE),
                Expression::new().literal("dog", Quantifier::ONCE),
            ],
            Quantifier::one_or_more(),
        );
        assert_eq!(re.render(), "(?:cat|dog)+");
    }

    #[test]
    fn empty_or_is_empty_group() {
        let re = Expression::new().or(&[], Quantifier::ONCE);
        assert_eq!(re.render(), "(?:)");
    }

    #[test]
    fn flags_never_touch_fragment() {
        let re = Expression::new()
            .literal("x", Quantifier::ONCE)
            .start_of_line(true)
            .end_of_line(true)
            .ignore_case(true)
            .search_first_line_only(true);
        assert_eq!(re.fragment(), "x");
        assert_eq!(re.render(), "^x$");
        assert_eq!(
            re.flags(),
            Flags::START_ANCHORED | Flags::END_ANCHORED | Flags::IGNORE_CASE | Flags::SINGLE_LINE
        );
    }

    #[test]
    fn multiline_and_first_line_only_share_a_flag() {
        let re = Expression::new().search_first_line_only(true);
        assert!(re.flags().contains(Flags::SINGLE_LINE));
        let re = re.multiline(true);
        assert!(!re.flags().contains(Flags::SINGLE_LINE));
        let re = re.multiline(false);
        assert!(re.flags().contains(Flags::SINGLE_LINE));
        let re = re.search_first_line_only(false);
        assert!(!re.flags().contains(Flags::SINGLE_LINE));
    }

    #[test]
    fn anchors_can_be_cleared() {
        let re = Expression::new()
            .literal("a", Quantifier::ONCE)
            .start_of_line(true)
            .start_of_line(false);
        assert_eq!(re.render(), "a");
    }

    #[test]
    fn display_and_equality() {
        let a = Expression::new().digit(Quantifier::ONCE).end_of_line(true);
        let b = Expression::raw(r"\d").end_of_line(true);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), r"\d$");
    }

    #[test]
    fn compile_is_lazy_and_cached() {
        let re = Expression::new().append_raw("(");
        let err = re.compile().unwrap_err();
        assert_eq!(err.pattern_text(), Some("("));

        let re = Expression::new().digit(Quantifier::ONCE);
        let first = re.compile().unwrap();
        let second = re.compile().unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert_eq!(first.as_str(), r"(?m)\d");
    }

    #[test]
    fn search_and_compile_share_one_cache_slot() {
        let re = Expression::new().digit(Quantifier::ONCE);
        assert!(re.compiled.get().is_none());
        assert!(re.has_match("7").unwrap());
        let cached = re.compiled.get().map(|m| m.as_str().to_string());
        assert_eq!(cached.as_deref(), Some(r"(?m)\d"));
        assert_eq!(re.compile().unwrap().as_str(), r"(?m)\d");

        let broken = Expression::new().append_raw("[");
        assert!(broken.has_match("x").is_err());
        assert!(broken.compiled.get().is_none());
    }

    #[test]
    fn extending_drops_cached_matcher() {
        let re = Expression::new().digit(Quantifier::ONCE);
        assert!(re.has_match("5").unwrap());
        let re = re.literal("x", Quantifier::ONCE);
        assert!(!re.has_match("5").unwrap());
        assert!(re.has_match("5x").unwrap());
    }

    #[test]
    fn compile_applies_flags() {
        let re = Expression::new()
            .literal("a", Quantifier::ONCE)
            .ignore_case(true)
            .search_first_line_only(true);
        assert_eq!(re.compile().unwrap().as_str(), "(?i)a");
    }
}
