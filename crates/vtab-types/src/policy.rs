//! Reference recognition.
//!
//! A reference is an opaque string that stands in for another document. The
//! core never interprets references; it only asks a [`RefPolicy`] whether a
//! string is one, and whether a user may expand it interactively.

use serde::{Deserialize, Serialize};

/// Default reserved key recording which reference a value was resolved from.
pub const DEFAULT_MARKER_KEY: &str = "__ref__";

/// Predicates deciding which strings are references.
///
/// `is_expandable` must only return `true` for strings that `is_ref` also
/// accepts; callers check both.
pub trait RefPolicy: Send + Sync {
    /// Is `candidate` syntactically a reference at all?
    fn is_ref(&self, candidate: &str) -> bool;

    /// May `candidate` be expanded interactively by a user?
    fn is_expandable(&self, candidate: &str) -> bool {
        self.is_ref(candidate)
    }
}

/// A [`RefPolicy`] recognising references by prefix.
///
/// Every string starting with `prefix` (and longer than it) is a reference.
/// When `expandable_prefixes` is non-empty only references whose remainder
/// after `prefix` starts with one of them are expandable; otherwise every
/// reference is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixRefPolicy {
    pub prefix: String,
    pub expandable_prefixes: Vec<String>,
}

impl Default for PrefixRefPolicy {
    fn default() -> Self {
        Self {
            prefix: "ref:".into(),
            expandable_prefixes: Vec::new(),
        }
    }
}

impl PrefixRefPolicy {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            expandable_prefixes: Vec::new(),
        }
    }

    /// Restrict interactive expansion to references under `prefix`.
    pub fn allow_expanding(mut self, prefix: impl Into<String>) -> Self {
        self.expandable_prefixes.push(prefix.into());
        self
    }

    /// The part of a reference after the policy prefix.
    pub fn strip<'a>(&self, reference: &'a str) -> Option<&'a str> {
        reference
            .strip_prefix(self.prefix.as_str())
            .filter(|rest| !rest.is_empty())
    }
}

impl RefPolicy for PrefixRefPolicy {
    fn is_ref(&self, candidate: &str) -> bool {
        self.strip(candidate).is_some()
    }

    fn is_expandable(&self, candidate: &str) -> bool {
        match self.strip(candidate) {
            Some(rest) => {
                self.expandable_prefixes.is_empty()
                    || self
                        .expandable_prefixes
                        .iter()
                        .any(|p| rest.starts_with(p.as_str()))
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_prefixed_strings() {
        let policy = PrefixRefPolicy::default();
        assert!(policy.is_ref("ref:abc"));
        assert!(!policy.is_ref("ref:"));
        assert!(!policy.is_ref("abc"));
    }

    #[test]
    fn every_ref_is_expandable_without_allow_list() {
        let policy = PrefixRefPolicy::default();
        assert!(policy.is_expandable("ref:abc"));
        assert!(!policy.is_expandable("plain"));
    }

    #[test]
    fn allow_list_restricts_expansion() {
        let policy = PrefixRefPolicy::new("obj:").allow_expanding("doc/");
        assert!(policy.is_ref("obj:blob/1"));
        assert!(!policy.is_expandable("obj:blob/1"));
        assert!(policy.is_expandable("obj:doc/1"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let policy: PrefixRefPolicy = serde_json::from_str(r#"{"prefix": "x:"}"#).unwrap();
        assert_eq!(policy.prefix, "x:");
        assert!(policy.expandable_prefixes.is_empty());
    }
}
