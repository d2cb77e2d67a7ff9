// escape.rs - Metacharacter escaping for literal pattern text.
//
// Every character the engine treats as syntax is prefixed with a
// backslash. The set is fixed for the lifetime of the process.

use std::borrow::Cow;

/// Returns `true` if `c` must be escaped to be matched literally.
#[inline]
pub fn is_meta(c: char) -> bool {
    matches!(
        c,
        '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '-' | '(' | ')' | '[' | ']' | '{' | '}'
    )
}

/// Escape every metacharacter in `text`.
///
/// Text without metacharacters is returned borrowed. Escaping is not
/// idempotent: escaping already-escaped text escapes the backslashes again.
///
/// ```
/// use rexcraft::escape::escape;
///
/// assert_eq!(escape("a.b"), r"a\.b");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    let first = match text.find(is_meta) {
        Some(pos) => pos,
        None => return Cow::Borrowed(text),
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        if is_meta(c) {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Escape a single character, appending the result to `out`.
pub(crate) fn push_escaped(out: &mut String, c: char) {
    if is_meta(c) {
        out.push('\\');
    }
    out.push(c);
}
