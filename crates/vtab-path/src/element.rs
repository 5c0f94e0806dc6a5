use std::fmt;

use serde::{Deserialize, Serialize};

/// One step in a [`Path`](crate::Path): an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

impl PathElement {
    /// The key, if this is a key element.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathElement::Key(k) => Some(k),
            PathElement::Index(_) => None,
        }
    }

    /// The index, if this is an index element.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathElement::Key(_) => None,
            PathElement::Index(i) => Some(*i),
        }
    }

    pub fn is_key(&self, key: &str) -> bool {
        self.as_key() == Some(key)
    }

    /// Append the canonical (escaped) form of this element.
    pub(crate) fn write_escaped(&self, out: &mut String, first: bool) {
        match self {
            PathElement::Key(key) => {
                if !first {
                    out.push('.');
                }
                for ch in key.chars() {
                    if matches!(ch, '.' | '[' | ']' | '\\') {
                        out.push('\\');
                    }
                    out.push(ch);
                }
            }
            PathElement::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
        }
    }
}

/// Unescaped form: the key itself, or the index in decimal.
impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(k) => f.write_str(k),
            PathElement::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<String> for PathElement {
    fn from(key: String) -> Self {
        PathElement::Key(key)
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        PathElement::Index(index)
    }
}
