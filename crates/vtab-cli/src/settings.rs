use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use vtab_expand::ExpandConfig;
use vtab_merge::MergeConfig;
use vtab_types::PrefixRefPolicy;

/// Settings file layout for the CLI.
///
/// `merge.marker_key` and `expand.marker_key` name the same provenance key
/// and must agree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub merge: MergeConfig,
    pub expand: ExpandConfig,
    pub refs: PrefixRefPolicy,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("loading config {}", path.display()))
    }

    /// Parse and validate a TOML settings document.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(text)?;
        anyhow::ensure!(
            settings.merge.marker_key == settings.expand.marker_key,
            "merge.marker_key ({:?}) and expand.marker_key ({:?}) must match",
            settings.merge.marker_key,
            settings.expand.marker_key,
        );
        Ok(settings)
    }
}
