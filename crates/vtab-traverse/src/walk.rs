use serde_json::Value;
use vtab_path::PathElement;

use crate::context::{TraverseContext, TraverseStats, Visit};

/// Walk `root` depth-first, pre-order.
///
/// The root is visited first at depth 0. Array elements are visited in
/// ascending index order and object members in insertion order. The walk
/// uses an explicit stack, so depth is bounded only by memory.
///
/// Two walks over the same unmodified value visit nodes in the same order.
pub fn traverse<'a, F>(root: &'a Value, mut visit: F) -> TraverseStats
where
    F: FnMut(&TraverseContext<'a>) -> Visit,
{
    let mut stats = TraverseStats::default();
    let mut stack = vec![TraverseContext::root(root)];

    while let Some(context) = stack.pop() {
        stats.visited += 1;
        stats.max_depth = stats.max_depth.max(context.depth);

        match visit(&context) {
            Visit::Continue => {}
            Visit::Skip => continue,
            Visit::Stop => {
                stats.stopped = true;
                break;
            }
        }

        // Children are pushed in reverse so the first child is popped first.
        match context.value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate().rev() {
                    stack.push(context.child(PathElement::Index(index), item));
                }
            }
            Value::Object(map) => {
                for (key, item) in map.iter().rev() {
                    stack.push(context.child(PathElement::Key(key.clone()), item));
                }
            }
            _ => {}
        }
    }

    stats
}
