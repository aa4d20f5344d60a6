//! Path syntax: segments, canonical indices, and the patterns that path
//! enumeration produces.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// The reserved segment separator.
pub const SEPARATOR: char = '.';

/// Split a path into segments. The empty path (the root) has none.
///
/// # Examples
///
/// ```
/// use dotpath::v1::segments;
///
/// assert_eq!(segments(""), Vec::<&str>::new());
/// assert_eq!(segments("a.0.b"), vec!["a", "0", "b"]);
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split(SEPARATOR).collect()
    }
}

/// Join segments back into a path.
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(seg.as_ref());
    }
    out
}

/// Parse a segment as a non-negative integer index in canonical decimal
/// form (`"0"`, `"17"`, but not `"01"`, `"+1"` or `""`).
pub fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

/// One segment of an enumerated [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternSegment {
    /// A declared field name.
    Key(String),
    /// A specific tuple position.
    Index(usize),
    /// Any array index or numeric index-signature key (`{number}`).
    AnyIndex,
    /// Any string index-signature key (`{string}`).
    AnyKey,
    /// Any further segments at all (`**`); only ever last.
    Rest,
}

impl PatternSegment {
    fn matches(&self, segment: &str) -> bool {
        match self {
            PatternSegment::Key(name) => name == segment,
            PatternSegment::Index(i) => parse_index(segment) == Some(*i),
            PatternSegment::AnyIndex => parse_index(segment).is_some(),
            PatternSegment::AnyKey | PatternSegment::Rest => true,
        }
    }
}

impl fmt::Display for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSegment::Key(name) => write!(f, "{}", name),
            PatternSegment::Index(i) => write!(f, "{}", i),
            PatternSegment::AnyIndex => write!(f, "{{number}}"),
            PatternSegment::AnyKey => write!(f, "{{string}}"),
            PatternSegment::Rest => write!(f, "**"),
        }
    }
}

/// An enumerated path, possibly containing wildcard segments.
///
/// Displays as its segments joined with `.`, e.g. `items.{number}.name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathPattern(Vec<PatternSegment>);

impl PathPattern {
    pub fn new(segments: Vec<PatternSegment>) -> Self {
        Self(segments)
    }

    pub fn single(segment: PatternSegment) -> Self {
        Self(vec![segment])
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.0
    }

    /// `head.self`
    pub fn prefixed(mut self, head: PatternSegment) -> Self {
        self.0.insert(0, head);
        self
    }

    /// Whether every segment is a literal key or index.
    pub fn is_concrete(&self) -> bool {
        self.0
            .iter()
            .all(|s| matches!(s, PatternSegment::Key(_) | PatternSegment::Index(_)))
    }

    /// Whether the concrete `path` is described by this pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotpath::v1::{PathPattern, PatternSegment};
    ///
    /// let p = PathPattern::new(vec![
    ///     PatternSegment::Key("items".into()),
    ///     PatternSegment::AnyIndex,
    /// ]);
    /// assert!(p.matches("items.3"));
    /// assert!(!p.matches("items.x"));
    /// assert!(!p.matches("items"));
    /// ```
    pub fn matches(&self, path: &str) -> bool {
        matches_segments(&self.0, &segments(path))
    }
}

fn matches_segments(pattern: &[PatternSegment], path: &[&str]) -> bool {
    match (pattern.split_first(), path.split_first()) {
        (None, None) => true,
        (Some((PatternSegment::Rest, _)), _) => !path.is_empty(),
        (Some((head, pattern_rest)), Some((segment, path_rest))) => {
            head.matches(segment) && matches_segments(pattern_rest, path_rest)
        }
        _ => false,
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The set of patterns produced by enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathSet(BTreeSet<PathPattern>);

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pattern: PathPattern) -> bool {
        self.0.insert(pattern)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathPattern> {
        self.0.iter()
    }

    /// Whether any pattern in the set matches `path`.
    pub fn contains(&self, path: &str) -> bool {
        let segs = segments(path);
        self.0.iter().any(|p| matches_segments(&p.0, &segs))
    }

    /// Display strings of every pattern, sorted.
    pub fn to_strings(&self) -> BTreeSet<String> {
        self.0.iter().map(|p| p.to_string()).collect()
    }

    /// Every pattern with `head` segments in front.
    pub fn prefixed(self, head: &[&str]) -> Self {
        self.0
            .into_iter()
            .map(|p| {
                head.iter().rev().fold(p, |acc, seg| {
                    acc.prefixed(PatternSegment::Key((*seg).to_string()))
                })
            })
            .collect()
    }
}

impl FromIterator<PathPattern> for PathSet {
    fn from_iter<I: IntoIterator<Item = PathPattern>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PathPattern> for PathSet {
    fn extend<I: IntoIterator<Item = PathPattern>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for PathSet {
    type Item = PathPattern;
    type IntoIter = std::collections::btree_set::IntoIter<PathPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
