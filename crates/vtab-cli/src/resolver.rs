use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use vtab_expand::{RefResolver, ResolveError};
use vtab_types::PrefixRefPolicy;

/// Resolves `<prefix><name>` to the JSON document `<dir>/<name>.json`.
///
/// `name` must be a relative path of plain components; references naming
/// `..`, `.`, a root or a drive prefix never leave `dir` and fail to
/// resolve.
pub struct DirResolver {
    dir: PathBuf,
    policy: PrefixRefPolicy,
}

impl DirResolver {
    pub fn new(dir: PathBuf, policy: PrefixRefPolicy) -> Self {
        Self { dir, policy }
    }

    /// The file a reference names inside the refs directory.
    fn file_for(&self, reference: &str) -> Option<PathBuf> {
        let name = self.policy.strip(reference)?;
        let confined = Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !confined {
            warn!(reference, "reference escapes the refs directory");
            return None;
        }
        Some(self.dir.join(format!("{name}.json")))
    }

    async fn load(&self, reference: &str) -> Option<Value> {
        let path = self.file_for(reference)?;
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(reference, path = %path.display(), error = %e, "cannot read reference");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(reference, path = %path.display(), error = %e, "reference is not valid JSON");
                None
            }
        }
    }
}

#[async_trait]
impl RefResolver for DirResolver {
    async fn resolve(&self, refs: &[String]) -> Result<Vec<Option<Value>>, ResolveError> {
        if !self.dir.is_dir() {
            return Err(ResolveError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        debug!(count = refs.len(), dir = %self.dir.display(), "resolving references");
        let mut out = Vec::with_capacity(refs.len());
        for reference in refs {
            out.push(self.load(reference).await);
        }
        Ok(out)
    }
}
