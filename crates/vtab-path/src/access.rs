//! Reading and writing values at a path.

use serde_json::{Map, Value};

use crate::element::PathElement;
use crate::path::Path;

impl Path {
    /// Follow this path from `root`.
    ///
    /// Returns `None` as soon as a step cannot be taken: a missing key, an
    /// out-of-range index, a key step into an array, an index step into an
    /// object, or any step into a scalar. Never fails otherwise.
    pub fn apply<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.elements()
            .iter()
            .try_fold(root, |node, element| step(node, element))
    }

    /// Mutable counterpart of [`Path::apply`].
    pub fn apply_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut node = root;
        for element in self.elements() {
            node = match (node, element) {
                (Value::Object(map), PathElement::Key(key)) => map.get_mut(key)?,
                (Value::Array(items), PathElement::Index(index)) => items.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Assign `value` at this path inside `root`, creating containers on the
    /// way.
    ///
    /// A missing intermediate becomes an array when the following element is
    /// an index and an object otherwise. An existing intermediate of the
    /// wrong kind (a scalar, or an array where a key is needed) is replaced
    /// by a fresh container. Writing past the end of an array pads it with
    /// `null`. Setting the root path replaces `root` entirely.
    pub fn set(&self, root: &mut Value, value: Value) {
        let Some((last, init)) = self.elements().split_last() else {
            *root = value;
            return;
        };

        let mut node = root;
        for element in init {
            node = slot(node, element);
        }
        *slot(node, last) = value;
    }
}

fn step<'a>(node: &'a Value, element: &PathElement) -> Option<&'a Value> {
    match (node, element) {
        (Value::Object(map), PathElement::Key(key)) => map.get(key),
        (Value::Array(items), PathElement::Index(index)) => items.get(*index),
        _ => None,
    }
}

/// Make `node` a container able to hold `next`, replacing it if needed.
fn ensure_container(node: &mut Value, next: &PathElement) {
    let fits = matches!(
        (&*node, next),
        (Value::Object(_), PathElement::Key(_)) | (Value::Array(_), PathElement::Index(_))
    );
    if !fits {
        *node = match next {
            PathElement::Key(_) => Value::Object(Map::new()),
            PathElement::Index(_) => Value::Array(Vec::new()),
        };
    }
}

/// The child slot for `element` inside `node`, created as `null` if absent.
fn slot<'a>(node: &'a mut Value, element: &PathElement) -> &'a mut Value {
    ensure_container(node, element);
    match (node, element) {
        (Value::Object(map), PathElement::Key(key)) => {
            map.entry(key.clone()).or_insert(Value::Null)
        }
        (Value::Array(items), PathElement::Index(index)) => {
            if items.len() <= *index {
                items.resize(*index + 1, Value::Null);
            }
            &mut items[*index]
        }
        _ => unreachable!("ensure_container guarantees a matching container"),
    }
}
