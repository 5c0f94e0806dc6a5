use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::element::PathElement;
use crate::error::{PathError, Result};

/// An immutable address of a node in a value tree.
///
/// The empty path addresses the root. Paths are never mutated in place;
/// [`Path::plus`] and friends return a new path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<PathElement>);

impl Path {
    /// The root path (no elements).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse the canonical textual form. See [`crate::parse`] for the grammar.
    pub fn parse(s: &str) -> Result<Self> {
        crate::parse::parse(s).map(Self)
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new path with `element` appended.
    pub fn plus(&self, element: impl Into<PathElement>) -> Self {
        let mut elements = Vec::with_capacity(self.0.len() + 1);
        elements.extend_from_slice(&self.0);
        elements.push(element.into());
        Self(elements)
    }

    pub fn plus_key(&self, key: impl Into<String>) -> Self {
        self.plus(PathElement::Key(key.into()))
    }

    pub fn plus_index(&self, index: usize) -> Self {
        self.plus(PathElement::Index(index))
    }

    /// The last element, or `None` for the root.
    pub fn tail(&self) -> Option<&PathElement> {
        self.0.last()
    }

    /// The path without its last element, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, rest)) => Some(Self(rest.to_vec())),
            None => None,
        }
    }

    /// Returns `true` if `prefix` is this path or one of its ancestors.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Each element stringified without escaping, for hierarchical grouping.
    pub fn to_string_array(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// Canonical escaped form; the inverse of [`Path::parse`].
///
/// The grammar has no empty key, so an empty key renders as nothing: the
/// path `[Key(""), Index(0)]` renders as `[0]`, the same text as
/// `[Index(0)]`. Keys produced by wrapping non-object resolutions under
/// `""` therefore share row keys with plain top-level arrays.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (i, element) in self.0.iter().enumerate() {
            element.write_escaped(&mut out, i == 0);
        }
        f.write_str(&out)
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(serde::de::Error::custom)
    }
}
