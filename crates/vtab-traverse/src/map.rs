use serde_json::{Map, Value};
use tracing::debug;

use crate::context::{TraverseContext, Visit};
use crate::walk::traverse;

/// Result of a [`map_object`] transform for one node.
#[derive(Clone, Debug, PartialEq)]
pub enum Mapped {
    /// Keep the node. A leaf is copied; a container is recreated empty and
    /// its children are visited and written into it.
    Keep,
    /// Write this value instead. A replaced container's original children
    /// are not visited, so nothing written under the replacement is
    /// clobbered by stale descendants.
    Replace(Value),
}

/// Build a new tree by rewriting every node of `root` below the root.
///
/// Nodes are written in pre-order, so a container always exists before its
/// children are written into it. A scalar root is returned as a copy.
pub fn map_object<F>(root: &Value, mut transform: F) -> Value
where
    F: FnMut(&TraverseContext<'_>) -> Mapped,
{
    let mut out = empty_like(root).unwrap_or_else(|| root.clone());
    let mut replaced = 0usize;

    let stats = traverse(root, |context| {
        if context.depth == 0 {
            return Visit::Continue;
        }
        match transform(context) {
            Mapped::Keep => {
                let value = empty_like(context.value).unwrap_or_else(|| context.value.clone());
                context.path.set(&mut out, value);
                Visit::Continue
            }
            Mapped::Replace(value) => {
                replaced += 1;
                context.path.set(&mut out, value);
                if context.is_leaf {
                    Visit::Continue
                } else {
                    Visit::Skip
                }
            }
        }
    });

    debug!(visited = stats.visited, replaced, "map_object complete");
    out
}

/// An empty container of the same kind, or `None` for a scalar.
fn empty_like(value: &Value) -> Option<Value> {
    match value {
        Value::Object(_) => Some(Value::Object(Map::new())),
        Value::Array(_) => Some(Value::Array(Vec::new())),
        _ => None,
    }
}
