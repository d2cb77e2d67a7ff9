// extract.rs - Flatten raw match occurrences into a name -> value map.
//
// One map is produced for a whole search. Named groups are keyed by name
// and later occurrences overwrite earlier ones. Patterns without named
// groups get positional keys taken from the map's size at insertion time,
// so numbering continues across occurrences ("0", "1", "2", ...).

use std::ops::Index;

use indexmap::IndexMap;
use log::trace;

use crate::matcher::Captures;

/// Insertion-ordered mapping from capture key to captured text.
///
/// A value of `None` means the group did not take part in the match.
/// Two maps are equal only if their entries appear in the same order.
///
/// ```
/// use rexcraft::extract::CaptureMap;
///
/// let mut map = CaptureMap::new();
/// map.insert("year", Some("2026".to_string()));
/// map.insert("day", None);
/// assert_eq!(map.get("year"), Some("2026"));
/// assert_eq!(map.get("day"), None);
/// assert!(map.contains_key("day"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureMap {
    entries: IndexMap<String, Option<String>>,
}

impl CaptureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// The captured text for `key`, or `None` if the key is missing or the
    /// group did not participate.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key)?.as_deref()
    }

    /// The raw entry for `key`: `Some(None)` for a non-participating group.
    pub fn entry(&self, key: &str) -> Option<&Option<String>> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl PartialEq for CaptureMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for CaptureMap {}

impl Index<&str> for CaptureMap {
    type Output = Option<String>;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &Option<String> {
        match self.entry(key) {
            Some(value) => value,
            None => panic!("no capture named {:?}", key),
        }
    }
}

impl IntoIterator for CaptureMap {
    type Item = (String, Option<String>);
    type IntoIter = indexmap::map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Option<String>)> for CaptureMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        CaptureMap {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A single match occurrence as seen by the extractor.
///
/// Implemented by [`Captures`]; the trait keeps the extraction rules
/// independent of the engine.
pub trait Occurrence {
    /// Names of the named groups present in the pattern, in group order.
    fn group_names(&self) -> Vec<&str>;
    /// Text of the named group, `None` if it did not participate.
    fn named(&self, name: &str) -> Option<&str>;
    /// Number of groups including group 0.
    fn group_count(&self) -> usize;
    /// Text of positional group `index`, `None` if it did not participate.
    fn positional(&self, index: usize) -> Option<&str>;
}

impl Occurrence for Captures<'_, '_> {
    fn group_names(&self) -> Vec<&str> {
        self.names().collect()
    }

    fn named(&self, name: &str) -> Option<&str> {
        self.name(name).map(|m| m.as_str())
    }

    fn group_count(&self) -> usize {
        self.len()
    }

    fn positional(&self, index: usize) -> Option<&str> {
        self.get(index).map(|m| m.as_str())
    }
}

/// Merge every occurrence of a search into one [`CaptureMap`].
pub fn extract<O, I>(occurrences: I) -> CaptureMap
where
    O: Occurrence,
    I: IntoIterator<Item = O>,
{
    let mut map = CaptureMap::new();
    let mut count = 0usize;
    for occurrence in occurrences {
        extract_into(&mut map, &occurrence);
        count += 1;
    }
    trace!("extracted {} capture(s) from {} occurrence(s)", map.len(), count);
    map
}

/// Merge a single occurrence into `map`.
pub fn extract_into<O: Occurrence + ?Sized>(map: &mut CaptureMap, occurrence: &O) {
    let names = occurrence.group_names();
    if names.is_empty() {
        for index in 1..occurrence.group_count() {
            let key = map.len().to_string();
            map.insert(key, occurrence.positional(index).map(str::to_string));
        }
    } else {
        for name in names {
            map.insert(name, occurrence.named(name).map(str::to_string));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        names: Vec<&'static str>,
        named: Vec<Option<&'static str>>,
        groups: Vec<Option<&'static str>>,
    }

    impl Fake {
        fn unnamed(groups: &[Option<&'static str>]) -> Self {
            let mut all = vec![Some("<whole>")];
            all.extend_from_slice(groups);
            Fake {
                names: Vec::new(),
                named: Vec::new(),
                groups: all,
            }
        }

        fn with_names(pairs: &[(&'static str, Option<&'static str>)]) -> Self {
            Fake {
                names: pairs.iter().map(|(n, _)| *n).collect(),
                named: pairs.iter().map(|(_, v)| *v).collect(),
                groups: vec![Some("<whole>")],
            }
        }
    }

    impl Occurrence for Fake {
        fn group_names(&self) -> Vec<&str> {
            self.names.clone()
        }

        fn named(&self, name: &str) -> Option<&str> {
            let idx = self.names.iter().position(|n| *n == name)?;
            self.named[idx]
        }

        fn group_count(&self) -> usize {
            self.groups.len()
        }

        fn positional(&self, index: usize) -> Option<&str> {
            self.groups.get(index).copied().flatten()
        }
    }

    #[test]
    fn no_occurrences_yields_empty_map() {
        let map = extract(Vec::<Fake>::new());
        assert!(map.is_empty());
    }

    #[test]
    fn positional_keys_follow_insertion_order() {
        let map = extract(vec![Fake::unnamed(&[Some("a"), Some("b")])]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["0", "1"]);
        assert_eq!(map.get("0"), Some("a"));
        assert_eq!(map.get("1"), Some("b"));
    }

    #[test]
    fn positional_keys_continue_across_occurrences() {
        let map = extract(vec![
            Fake::unnamed(&[Some("a"), Some("b")]),
            Fake::unnamed(&[Some("c"), None]),
        ]);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["0", "1", "2", "3"]);
        assert_eq!(map.get("2"), Some("c"));
        assert_eq!(map.entry("3"), Some(&None));
    }

    #[test]
    fn whole_match_is_never_reported() {
        let map = extract(vec![Fake::unnamed(&[])]);
        assert!(map.is_empty());
    }

    #[test]
    fn named_groups_overwrite_earlier_occurrences() {
        let map = extract(vec![
            Fake::with_names(&[("name", Some("first")), ("id", Some("1"))]),
            Fake::with_names(&[("name", Some("second")), ("id", None)]),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some("second"));
        assert_eq!(map.entry("id"), Some(&None));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "id"]);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = CaptureMap::new();
        map.insert("a", Some("1".to_string()));
        map.insert("b", Some("2".to_string()));
        map.insert("a", Some("3".to_string()));
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![("a", Some("3")), ("b", Some("2"))]);
    }

    #[test]
    fn index_and_into_iter() {
        let map: CaptureMap = vec![
            ("x".to_string(), Some("1".to_string())),
            ("y".to_string(), None),
        ]
        .into_iter()
        .collect();
        assert_eq!(map["x"], Some("1".to_string()));
        assert_eq!(map["y"], None);
        let owned: Vec<_> = map.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }

    #[test]
    fn equality_depends_on_order() {
        let mut ab = CaptureMap::new();
        ab.insert("a", None);
        ab.insert("b", None);
        let mut ba = CaptureMap::new();
        ba.insert("b", None);
        ba.insert("a", None);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn many_positional_captures_keep_their_order() {
        let groups: Vec<Option<&'static str>> = vec![Some("x"); 5000];
        let map = extract(vec![Fake::unnamed(&groups), Fake::unnamed(&groups)]);
        assert_eq!(map.len(), 10_000);
        assert_eq!(map.keys().nth(7_321), Some("7321"));
        assert_eq!(map.get("9999"), Some("x"));
    }

    #[test]
    #[should_panic(expected = "no capture named")]
    fn index_missing_key_panics() {
        let map = CaptureMap::new();
        let _ = &map["missing"];
    }
}
