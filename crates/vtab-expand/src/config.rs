use serde::{Deserialize, Serialize};
use vtab_types::DEFAULT_MARKER_KEY;

/// Configuration for the [`Expander`](crate::Expander).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandConfig {
    /// Key attached to every resolution, holding the reference it came from.
    /// Must match the merge configuration's marker key.
    pub marker_key: String,
    /// Upper bound on substitution passes. Cyclic references never reach a
    /// fixpoint; the loop stops here instead.
    pub max_passes: usize,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            marker_key: DEFAULT_MARKER_KEY.into(),
            max_passes: 32,
        }
    }
}
