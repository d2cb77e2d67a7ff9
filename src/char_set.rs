// char_set.rs - Bracketed character classes built member by member.
//
// Members are kept in insertion order with duplicates collapsed, so the
// rendered text is stable for a given sequence of calls.

use std::fmt;

use indexmap::IndexSet;

use crate::escape::push_escaped;

/// Whether a class matches its members or everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Include,
    Exclude,
}

/// Which ASCII letters a letter class covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LetterCase {
    Lower,
    Upper,
    #[default]
    Both,
}

impl LetterCase {
    /// The range tokens for this case, without brackets.
    pub(crate) fn ranges(self) -> &'static str {
        match self {
            LetterCase::Lower => "a-z",
            LetterCase::Upper => "A-Z",
            LetterCase::Both => "a-zA-Z",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Member {
    Range(char, char),
    Shorthand(&'static str),
}

impl Member {
    fn write_to(&self, out: &mut String) {
        match *self {
            Member::Range(from, to) => {
                push_escaped(out, from);
                out.push('-');
                push_escaped(out, to);
            }
            Member::Shorthand(token) => out.push_str(token),
        }
    }
}

/// A character class such as `[a-z0-9_]` or `[^0-9]`.
///
/// ```
/// use rexcraft::char_set::{CharacterSet, LetterCase};
///
/// let set = CharacterSet::include()
///     .letters(LetterCase::Lower)
///     .digits()
///     .literals("_-");
/// assert_eq!(set.render(), r"[a-z0-9_\-]");
///
/// assert_eq!(CharacterSet::exclude().digits().render(), "[^0-9]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CharacterSet {
    scope: Scope,
    members: IndexSet<Member>,
    literals: IndexSet<char>,
}

impl CharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty class that matches its members.
    pub fn include() -> Self {
        Self::default()
    }

    /// An empty class that matches everything except its members.
    pub fn exclude() -> Self {
        CharacterSet {
            scope: Scope::Exclude,
            ..Self::default()
        }
    }

    /// Switch this class to match its members.
    pub fn including(mut self) -> Self {
        self.scope = Scope::Include;
        self
    }

    /// Switch this class to match everything except its members.
    pub fn excluding(mut self) -> Self {
        self.scope = Scope::Exclude;
        self
    }

    pub fn digits(self) -> Self {
        self.member(Member::Range('0', '9'))
    }

    pub fn letters(self, case: LetterCase) -> Self {
        match case {
            LetterCase::Lower => self.member(Member::Range('a', 'z')),
            LetterCase::Upper => self.member(Member::Range('A', 'Z')),
            LetterCase::Both => self
                .member(Member::Range('a', 'z'))
                .member(Member::Range('A', 'Z')),
        }
    }

    /// Add the inclusive range `from..=to`. Endpoints that are
    /// metacharacters are escaped.
    pub fn range(self, from: char, to: char) -> Self {
        self.member(Member::Range(from, to))
    }

    /// Add every character of `text` as a literal member.
    pub fn literals(mut self, text: &str) -> Self {
        self.literals.extend(text.chars());
        self
    }

    pub fn whitespace(self) -> Self {
        self.member(Member::Shorthand(r"\s"))
    }

    pub fn non_whitespace(self) -> Self {
        self.member(Member::Shorthand(r"\S"))
    }

    pub fn word_chars(self) -> Self {
        self.member(Member::Shorthand(r"\w"))
    }

    pub fn non_word_chars(self) -> Self {
        self.member(Member::Shorthand(r"\W"))
    }

    pub fn tab(self) -> Self {
        self.member(Member::Shorthand(r"\t"))
    }

    /// Carriage return and line feed.
    pub fn line_breaks(self) -> Self {
        self.member(Member::Shorthand(r"\r"))
            .member(Member::Shorthand(r"\n"))
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// `true` if nothing has been added. An empty class is rejected by
    /// the engine when the pattern compiles.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty() && self.literals.is_empty()
    }

    /// Render as bracketed pattern text.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(2 + self.members.len() * 3 + self.literals.len() * 2);
        out.push('[');
        if self.scope == Scope::Exclude {
            out.push('^');
        }
        for member in &self.members {
            member.write_to(&mut out);
        }
        for &c in &self.literals {
            push_escaped(&mut out, c);
        }
        out.push(']');
        out
    }

    fn member(mut self, member: Member) -> Self {
        self.members.insert(member);
        self
    }
}

// Order is part of the rendered text, so it is part of equality.
impl PartialEq for CharacterSet {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope
            && self.members.iter().eq(other.members.iter())
            && self.literals.iter().eq(other.literals.iter())
    }
}

impl Eq for CharacterSet {}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
