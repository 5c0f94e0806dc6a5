use std::fmt;

use serde::{Deserialize, Serialize};

/// How a value at one path differs between two sides of a comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    #[default]
    Unchanged,
    /// Present only on the right-hand (newer) side.
    Added,
    /// Present only on the left-hand (older) side.
    Deleted,
    Changed,
}

impl ChangeKind {
    /// Returns `true` for anything other than `Unchanged`.
    pub fn is_change(self) -> bool {
        self != ChangeKind::Unchanged
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Added => "added",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Changed => "changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
