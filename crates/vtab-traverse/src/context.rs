use serde_json::Value;
use vtab_path::{Path, PathElement};
use vtab_types::ValueKind;

/// Snapshot of one visited node.
#[derive(Clone, Debug)]
pub struct TraverseContext<'a> {
    /// Address of the node from the traversal root.
    pub path: Path,
    pub value: &'a Value,
    pub kind: ValueKind,
    /// `true` unless the node is an object or array.
    pub is_leaf: bool,
    /// 0 at the root.
    pub depth: usize,
}

impl<'a> TraverseContext<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self::new(Path::root(), value, 0)
    }

    fn new(path: Path, value: &'a Value, depth: usize) -> Self {
        let kind = ValueKind::of(value);
        Self {
            path,
            value,
            kind,
            is_leaf: kind.is_leaf(),
            depth,
        }
    }

    /// Context for a direct child of this node.
    pub fn child(&self, element: PathElement, value: &'a Value) -> Self {
        Self::new(self.path.plus(element), value, self.depth + 1)
    }

    /// The node's value as a string, if it is one.
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }
}

/// What the visitor wants the walk to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Descend into this node's children (if any) and carry on.
    Continue,
    /// Do not descend into this node's children, but carry on.
    Skip,
    /// Abort the whole walk; no further callbacks.
    Stop,
}

/// Summary of a finished walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraverseStats {
    /// Number of visitor callbacks made.
    pub visited: usize,
    pub max_depth: usize,
    /// `true` if the visitor returned [`Visit::Stop`].
    pub stopped: bool,
}
