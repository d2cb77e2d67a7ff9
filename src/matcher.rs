// matcher.rs - Adapter over the external regex engine.
//
// Wraps `fancy_regex::Regex` with the handful of operations the rest of
// the crate needs: Matcher, MatcherBuilder, Match, Captures and the two
// lazy iterators. Engine options are applied as an inline flag prefix so
// the group numbering of the composed text is unchanged.

use std::fmt;
use std::ops::Range;

use log::debug;
use smallvec::SmallVec;

use crate::error::{Error, Result};

/// A compiled pattern, ready to run.
///
/// # Examples
///
/// ```
/// use rexcraft::matcher::Matcher;
///
/// let m = Matcher::new(r"\d+").unwrap();
/// assert!(m.is_match("hello 42").unwrap());
///
/// let found = m.find("hello 42").unwrap().unwrap();
/// assert_eq!(found.as_str(), "42");
/// assert_eq!(found.start(), 6);
/// ```
#[derive(Clone)]
pub struct Matcher {
    inner: fancy_regex::Regex,
    source: String,
    names: Vec<Option<String>>,
}

impl Matcher {
    /// Compile `pattern` with default options (case-sensitive, single-line anchors).
    pub fn new(pattern: &str) -> Result<Matcher> {
        MatcherBuilder::new(pattern).build()
    }

    /// Create a [`MatcherBuilder`] for fine-grained control over compilation.
    pub fn builder(pattern: &str) -> MatcherBuilder {
        MatcherBuilder::new(pattern)
    }

    /// The text handed to the engine, including any inline flag prefix.
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// The pattern text as given to the builder.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Check whether `text` matches anywhere.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        self.inner.is_match(text).map_err(Error::execution)
    }

    /// Return the first match in `text`.
    pub fn find<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>> {
        self.find_at(text, 0)
    }

    /// Return the first match starting the search at byte offset `start`.
    ///
    /// Text before `start` is still visible to look-behind assertions.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Result<Option<Match<'t>>> {
        let found = self
            .inner
            .find_from_pos(text, start)
            .map_err(Error::execution)?;
        Ok(found.map(|m| Match {
            text,
            start: m.start(),
            end: m.end(),
        }))
    }

    /// Return the first match with all of its groups.
    pub fn captures<'r, 't>(&'r self, text: &'t str) -> Result<Option<Captures<'r, 't>>> {
        self.captures_at(text, 0)
    }

    /// Return the first match with all of its groups, searching from `start`.
    pub fn captures_at<'r, 't>(
        &'r self,
        text: &'t str,
        start: usize,
    ) -> Result<Option<Captures<'r, 't>>> {
        let caps = self
            .inner
            .captures_from_pos(text, start)
            .map_err(Error::execution)?;
        Ok(caps.map(|caps| Captures::from_engine(self, text, &caps)))
    }

    /// Iterate over all non-overlapping matches in `text`.
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> FindIter<'r, 't> {
        self.find_iter_at(text, 0)
    }

    /// Iterate over all non-overlapping matches, starting at `start`.
    pub fn find_iter_at<'r, 't>(&'r self, text: &'t str, start: usize) -> FindIter<'r, 't> {
        FindIter {
            matcher: self,
            text,
            cursor: Cursor::new(start),
        }
    }

    /// Iterate over the groups of every non-overlapping match in `text`.
    pub fn captures_iter<'r, 't>(&'r self, text: &'t str) -> CapturesIter<'r, 't> {
        self.captures_iter_at(text, 0)
    }

    /// Iterate over the groups of every non-overlapping match, starting at `start`.
    pub fn captures_iter_at<'r, 't>(&'r self, text: &'t str, start: usize) -> CapturesIter<'r, 't> {
        CapturesIter {
            matcher: self,
            text,
            cursor: Cursor::new(start),
        }
    }

    /// Number of groups in the pattern, including group 0.
    pub fn captures_len(&self) -> usize {
        self.names.len()
    }

    /// Names of all named groups, in group order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().filter_map(|name| name.as_deref())
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|candidate| candidate.as_deref() == Some(name))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("pattern", &self.as_str())
            .finish_non_exhaustive()
    }
}

// === MatcherBuilder ===

/// Builder for compiling a [`Matcher`] with custom options.
///
/// # Examples
///
/// ```
/// use rexcraft::matcher::Matcher;
///
/// let m = Matcher::builder(r"^world")
///     .case_insensitive(true)
///     .multi_line(true)
///     .build()
///     .unwrap();
/// assert_eq!(m.as_str(), "(?im)^world");
/// assert!(m.is_match("hello\nWORLD").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MatcherBuilder {
    pattern: String,
    case_insensitive: bool,
    multi_line: bool,
    backtrack_limit: Option<usize>,
}

impl MatcherBuilder {
    /// Create a new builder for the given pattern.
    pub fn new(pattern: &str) -> Self {
        MatcherBuilder {
            pattern: pattern.to_string(),
            case_insensitive: false,
            multi_line: false,
            backtrack_limit: None,
        }
    }

    /// Enable or disable case-insensitive matching.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Enable or disable `^`/`$` matching at every line boundary.
    pub fn multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    /// Cap the number of backtracking steps per search. Searches that
    /// exceed it fail with [`Error::Execution`].
    ///
    /// The cap only applies to patterns that need the backtracking VM,
    /// i.e. ones with lookaround or backreferences. Other patterns run on
    /// the linear-time engine and never hit it; `(a+)+b` stays `Ok(false)`
    /// even with a limit of 10.
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }

    /// Compile the pattern into a [`Matcher`].
    pub fn build(self) -> Result<Matcher> {
        let full = self.full_pattern();
        debug!(
            "compiling pattern {:?} (case_insensitive={}, multi_line={})",
            self.pattern, self.case_insensitive, self.multi_line
        );

        let mut builder = fancy_regex::RegexBuilder::new(&full);
        if let Some(limit) = self.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        let inner = builder.build().map_err(|err| {
            debug!("pattern {:?} rejected: {}", full, err);
            Error::pattern(&self.pattern, err)
        })?;

        let names = inner
            .capture_names()
            .map(|name| name.map(str::to_string))
            .collect();

        Ok(Matcher {
            inner,
            source: self.pattern,
            names,
        })
    }

    fn full_pattern(&self) -> String {
        let mut flags = String::new();
        if self.case_insensitive {
            flags.push('i');
        }
        if self.multi_line {
            flags.push('m');
        }
        if flags.is_empty() {
            self.pattern.clone()
        } else {
            format!("(?{}){}", flags, self.pattern)
        }
    }
}

// === Match ===

/// A single match, referencing the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t str,
    start: usize,
    end: usize,
}

impl<'t> Match<'t> {
    /// Byte offset of the start of the match.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the end of the match (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.start..self.end]
    }

    /// Length of the match in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// === Captures ===

/// All groups of a single match occurrence.
///
/// Group 0 is the whole match. Groups 1..N follow the opening parentheses
/// of capturing groups in the pattern.
pub struct Captures<'r, 't> {
    text: &'t str,
    groups: SmallVec<[Option<(usize, usize)>; 8]>,
    matcher: &'r Matcher,
}

impl<'r, 't> Captures<'r, 't> {
    fn from_engine(matcher: &'r Matcher, text: &'t str, caps: &fancy_regex::Captures<'t>) -> Self {
        let groups = (0..caps.len())
            .map(|i| caps.get(i).map(|m| (m.start(), m.end())))
            .collect();
        Captures {
            text,
            groups,
            matcher,
        }
    }

    /// Get group `i`, or `None` if it did not participate in the match.
    pub fn get(&self, i: usize) -> Option<Match<'t>> {
        let (start, end) = (*self.groups.get(i)?)?;
        Some(Match {
            text: self.text,
            start,
            end,
        })
    }

    /// Get the group called `name`, or `None` if there is no such group or
    /// it did not participate.
    pub fn name(&self, name: &str) -> Option<Match<'t>> {
        self.get(self.matcher.group_index(name)?)
    }

    /// Names of the named groups in the pattern, in group order.
    pub fn names(&self) -> impl Iterator<Item = &'r str> + 'r {
        self.matcher.group_names()
    }

    /// `true` if the pattern declares at least one named group.
    pub fn has_names(&self) -> bool {
        self.matcher.group_names().next().is_some()
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over all groups, group 0 first.
    pub fn iter(&self) -> GroupIter<'_, 'r, 't> {
        GroupIter {
            captures: self,
            index: 0,
        }
    }
}

impl fmt::Debug for Captures<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for m in self.iter() {
            list.entry(&m.map(|m| m.as_str()));
        }
        list.finish()
    }
}

// === GroupIter ===

/// Iterator over the groups of a [`Captures`].
pub struct GroupIter<'c, 'r, 't> {
    captures: &'c Captures<'r, 't>,
    index: usize,
}

impl<'c, 'r, 't> Iterator for GroupIter<'c, 'r, 't> {
    type Item = Option<Match<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.captures.len() {
            return None;
        }
        let m = self.captures.get(self.index);
        self.index += 1;
        Some(m)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.captures.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GroupIter<'_, '_, '_> {}

// === Iteration ===

/// Search position shared by the match iterators.
///
/// An empty match directly after the previous match is skipped by
/// stepping one character forward, which keeps iteration finite.
#[derive(Debug, Clone)]
struct Cursor {
    pos: usize,
    last_end: Option<usize>,
    done: bool,
}

impl Cursor {
    fn new(start: usize) -> Self {
        Cursor {
            pos: start,
            last_end: None,
            done: false,
        }
    }

    fn step<T>(
        &mut self,
        text: &str,
        mut search: impl FnMut(usize) -> Result<Option<(T, usize, usize)>>,
    ) -> Option<Result<T>> {
        loop {
            if self.done || self.pos > text.len() {
                return None;
            }
            let (item, start, end) = match search(self.pos) {
                Ok(Some(found)) => found,
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            if start == end && self.last_end == Some(end) {
                match text[self.pos..].chars().next() {
                    Some(c) => self.pos += c.len_utf8(),
                    None => self.done = true,
                }
                continue;
            }

            self.pos = end;
            self.last_end = Some(end);
            return Some(Ok(item));
        }
    }
}

/// Iterator over all non-overlapping matches in a text.
#[derive(Debug)]
pub struct FindIter<'r, 't> {
    matcher: &'r Matcher,
    text: &'t str,
    cursor: Cursor,
}

impl<'r, 't> Iterator for FindIter<'r, 't> {
    type Item = Result<Match<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = self.matcher;
        let text = self.text;
        self.cursor.step(text, |pos| {
            Ok(matcher
                .find_at(text, pos)?
                .map(|m| (m, m.start(), m.end())))
        })
    }
}

/// Iterator over the groups of all non-overlapping matches in a text.
#[derive(Debug)]
pub struct CapturesIter<'r, 't> {
    matcher: &'r Matcher,
    text: &'t str,
    cursor: Cursor,
}

impl<'r, 't> Iterator for CapturesIter<'r, 't> {
    type Item = Result<Captures<'r, 't>>;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = self.matcher;
        let text = self.text;
        self.cursor.step(text, |pos| {
            Ok(matcher.captures_at(text, pos)?.and_then(|caps| {
                let whole = caps.get(0)?;
                Some((caps, whole.start(), whole.end()))
            }))
        })
    }
}
