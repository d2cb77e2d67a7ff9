// group.rs - Group kinds and their opening markers.

use std::fmt;

/// The kind of parenthesized group to emit.
///
/// ```
/// use rexcraft::group::GroupKind;
///
/// assert_eq!(GroupKind::NonCapturing.marker(), "?:");
/// assert_eq!(GroupKind::named("year").marker(), "?<year>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GroupKind {
    /// `(?:...)`
    #[default]
    NonCapturing,
    /// `(...)`, numbered by position.
    Capturing,
    /// `(?<name>...)`. The name is not validated.
    Named(String),
    /// `(?=...)`
    LookAhead,
    /// `(?!...)`
    NegativeLookAhead,
    /// `(?<=...)`
    LookBehind,
    /// `(?<!...)`
    NegativeLookBehind,
}

impl GroupKind {
    pub fn named(name: impl Into<String>) -> Self {
        GroupKind::Named(name.into())
    }

    /// Text placed right after the opening parenthesis.
    pub fn marker(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKind::NonCapturing => f.write_str("?:"),
            GroupKind::Capturing => Ok(()),
            GroupKind::Named(name) => write!(f, "?<{}>", name),
            GroupKind::LookAhead => f.write_str("?="),
            GroupKind::NegativeLookAhead => f.write_str("?!"),
            GroupKind::LookBehind => f.write_str("?<="),
            GroupKind::NegativeLookBehind => f.write_str("?<!"),
        }
    }
}
