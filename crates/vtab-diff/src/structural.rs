//! Pairwise deep diff.
//!
//! The walk runs both trees in lock-step on an explicit work stack. Each
//! pair of containers expands into its child work followed by a summary
//! item, so results for a parent come out in this order: `left`'s keys
//! (sorted) interleaved with their recursive results, then `right`'s extra
//! keys (sorted), then the parent's own summary.
//!
//! Cycle guard: the identities of every container pair on the active branch
//! are kept in a set. A pair met again while still on the branch yields no
//! entries. Owned trees cannot form cycles, but the guard keeps the walk
//! finite for any aliasing value source.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;
use vtab_path::Path;
use vtab_types::{same_value, ChangeKind};

use crate::entry::{DiffEntry, DiffReport};

type Identity = (*const Value, *const Value);

enum Work<'a> {
    Compare {
        path: Path,
        left: &'a Value,
        right: &'a Value,
    },
    Emit(DiffEntry<'a>),
    Summarize {
        path: Path,
        left: &'a Value,
        right: &'a Value,
        first_entry: usize,
    },
}

/// Compute the structural diff between `left` and `right`.
///
/// - Scalars (or a scalar against a container) are compared with
///   same-value semantics and produce one `Unchanged` or `Changed` entry.
/// - Arrays are compared index by index up to the shorter length; extra
///   indices are `Added` (only in `right`) or `Deleted` (only in `left`).
/// - Objects recurse into shared keys; keys only in `left` are `Deleted`,
///   keys only in `right` are `Added`.
/// - An array against an object is a single `Changed` entry carrying both
///   values.
/// - Every pair of compared containers ends with a summary entry at its own
///   path carrying both containers: `Changed` if any entry beneath it is a
///   change, else `Unchanged`.
pub fn diff<'a>(left: &'a Value, right: &'a Value) -> Vec<DiffEntry<'a>> {
    let mut entries = Vec::new();
    let mut visiting: HashSet<Identity> = HashSet::new();
    let mut stack = vec![Work::Compare {
        path: Path::root(),
        left,
        right,
    }];

    while let Some(work) = stack.pop() {
        match work {
            Work::Emit(entry) => entries.push(entry),
            Work::Summarize {
                path,
                left,
                right,
                first_entry,
            } => {
                visiting.remove(&(left as *const Value, right as *const Value));
                let changed = entries[first_entry..]
                    .iter()
                    .any(|e| e.change_kind.is_change());
                entries.push(DiffEntry::summary(path, changed, left, right));
            }
            Work::Compare { path, left, right } => match (left, right) {
                (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)) => {
                    let identity: Identity = (left as *const Value, right as *const Value);
                    if !visiting.insert(identity) {
                        continue;
                    }
                    let children = match (left, right) {
                        (Value::Object(l), Value::Object(r)) => object_children(&path, l, r),
                        (Value::Array(l), Value::Array(r)) => array_children(&path, l, r),
                        _ => Vec::new(),
                    };
                    stack.push(Work::Summarize {
                        path,
                        left,
                        right,
                        first_entry: entries.len(),
                    });
                    stack.extend(children.into_iter().rev());
                }
                (Value::Object(_), Value::Array(_)) | (Value::Array(_), Value::Object(_)) => {
                    entries.push(DiffEntry::new(
                        ChangeKind::Changed,
                        path,
                        Some(left),
                        Some(right),
                    ));
                }
                _ => {
                    let kind = if same_value(left, right) {
                        ChangeKind::Unchanged
                    } else {
                        ChangeKind::Changed
                    };
                    entries.push(DiffEntry::new(
                        kind,
                        path,
                        Some(left),
                        Some(right),
                    ));
                }
            },
        }
    }

    debug!(entries = entries.len(), "structural diff complete");
    entries
}

/// [`diff`] wrapped in a [`DiffReport`].
pub fn diff_report<'a>(left: &'a Value, right: &'a Value) -> DiffReport<'a> {
    DiffReport::new(diff(left, right))
}

fn object_children<'a>(
    path: &Path,
    left: &'a Map<String, Value>,
    right: &'a Map<String, Value>,
) -> Vec<Work<'a>> {
    let mut work = Vec::with_capacity(left.len().max(right.len()));

    let mut left_keys: Vec<&String> = left.keys().collect();
    left_keys.sort();
    for key in left_keys {
        let child = path.plus_key(key.as_str());
        let left_value = &left[key];
        match right.get(key) {
            Some(right_value) => work.push(Work::Compare {
                path: child,
                left: left_value,
                right: right_value,
            }),
            None => work.push(Work::Emit(DiffEntry::new(
                ChangeKind::Deleted,
                child,
                Some(left_value),
                None,
            ))),
        }
    }

    let mut right_keys: Vec<&String> = right.keys().filter(|k| !left.contains_key(*k)).collect();
    right_keys.sort();
    for key in right_keys {
        work.push(Work::Emit(DiffEntry::new(
            ChangeKind::Added,
            path.plus_key(key.as_str()),
            None,
            Some(&right[key]),
        )));
    }

    work
}

fn array_children<'a>(path: &Path, left: &'a [Value], right: &'a [Value]) -> Vec<Work<'a>> {
    let shared = left.len().min(right.len());
    let mut work: Vec<Work<'a>> = left
        .iter()
        .zip(right)
        .enumerate()
        .map(|(index, (l, r))| Work::Compare {
            path: path.plus_index(index),
            left: l,
            right: r,
        })
        .collect();

    for (index, value) in right.iter().enumerate().skip(shared) {
        work.push(Work::Emit(DiffEntry::new(
            ChangeKind::Added,
            path.plus_index(index),
            None,
            Some(value),
        )));
    }
    for (index, value) in left.iter().enumerate().skip(shared) {
        work.push(Work::Emit(DiffEntry::new(
            ChangeKind::Deleted,
            path.plus_index(index),
            Some(value),
            None,
        )));
    }

    work
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Number};

    fn path(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    fn pairs(entries: &[DiffEntry]) -> Vec<(String, ChangeKind)> {
        entries
            .iter()
            .map(|e| (e.path.to_string(), e.change_kind))
            .collect()
    }

    #[test]
    fn identical_values_are_all_unchanged() {
        let doc = json!({"a": 1, "b": [1, 2]});
        let copy = doc.clone();
        let entries = diff(&doc, &copy);
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.change_kind == ChangeKind::Unchanged));
    }

    #[test]
    fn changed_leaf_and_root_summary() {
        let (left, right) = (json!({"a": 1}), json!({"a": 5}));
        let entries = diff(&left, &right);
        assert!(entries.contains(&DiffEntry::new(
            ChangeKind::Changed,
            path("a"),
            Some(&json!(1)),
            Some(&json!(5)),
        )));
        let root = entries.iter().find(|e| e.path.is_empty()).unwrap();
        assert_eq!(root.change_kind, ChangeKind::Changed);
    }

    #[test]
    fn object_ordering_is_sorted_left_then_right_extras_then_summary() {
        let left = json!({"b": 1, "a": 1, "gone": 0});
        let right = json!({"a": 2, "b": 1, "z": 3, "new": 4});
        assert_eq!(
            pairs(&diff(&left, &right)),
            vec![
                ("a".to_string(), ChangeKind::Changed),
                ("b".to_string(), ChangeKind::Unchanged),
                ("gone".to_string(), ChangeKind::Deleted),
                ("new".to_string(), ChangeKind::Added),
                ("z".to_string(), ChangeKind::Added),
                (String::new(), ChangeKind::Changed),
            ]
        );
    }

    #[test]
    fn nested_results_are_interleaved() {
        let left = json!({"a": {"x": 1}, "b": 2});
        let right = json!({"a": {"x": 1}, "b": 3});
        assert_eq!(
            pairs(&diff(&left, &right)),
            vec![
                ("a.x".to_string(), ChangeKind::Unchanged),
                ("a".to_string(), ChangeKind::Unchanged),
                ("b".to_string(), ChangeKind::Changed),
                (String::new(), ChangeKind::Changed),
            ]
        );
    }

    #[test]
    fn array_growth_and_shrink() {
        let (short, long) = (json!([1, 2]), json!([1, 2, 3]));
        let grown = diff(&short, &long);
        let added = grown.iter().find(|e| e.path == path("[2]")).unwrap();
        assert_eq!(added.change_kind, ChangeKind::Added);
        assert_eq!(added.left, None);
        assert_eq!(added.right, Some(&json!(3)));

        let single = json!([1]);
        let shrunk = diff(&long, &single);
        let kinds: Vec<_> = pairs(&shrunk);
        assert!(kinds.contains(&("[1]".to_string(), ChangeKind::Deleted)));
        assert!(kinds.contains(&("[2]".to_string(), ChangeKind::Deleted)));
        assert_eq!(kinds.last(), Some(&(String::new(), ChangeKind::Changed)));
    }

    #[test]
    fn mismatched_container_kinds_short_circuit() {
        let (left, right) = (json!({"a": [1, 2]}), json!({"a": {"0": 1}}));
        let entries = diff(&left, &right);
        assert_eq!(
            pairs(&entries),
            vec![
                ("a".to_string(), ChangeKind::Changed),
                (String::new(), ChangeKind::Changed),
            ]
        );
        assert_eq!(entries[0].left, Some(&json!([1, 2])));
        assert_eq!(entries[0].right, Some(&json!({"0": 1})));
    }

    #[test]
    fn scalar_against_container_is_changed() {
        let (left, right) = (json!(null), json!({"a": 1}));
        let entries = diff(&left, &right);
        assert_eq!(pairs(&entries), vec![(String::new(), ChangeKind::Changed)]);
    }

    #[test]
    fn signed_zero_is_a_change() {
        let pos = Value::Number(Number::from_f64(0.0).unwrap());
        let neg = Value::Number(Number::from_f64(-0.0).unwrap());
        let (left, right) = (json!({"z": pos}), json!({"z": neg}));
        let entries = diff(&left, &right);
        assert_eq!(entries[0].change_kind, ChangeKind::Changed);
    }

    #[test]
    fn empty_containers_summarize_unchanged() {
        assert_eq!(
            pairs(&diff(&json!({}), &json!({}))),
            vec![(String::new(), ChangeKind::Unchanged)]
        );
    }

    #[test]
    fn same_node_twice_is_not_guarded() {
        // Comparing a tree with itself puts identical identities on both
        // sides; each pair is still visited exactly once.
        let doc = json!({"a": {"b": [1]}});
        let entries = diff(&doc, &doc);
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn report_counters() {
        let left = json!({"keep": 1, "mod": 1, "del": 1});
        let right = json!({"keep": 1, "mod": 2, "add": 1});
        let report = diff_report(&left, &right);
        assert_eq!(report.additions(), 1);
        assert_eq!(report.deletions(), 1);
        assert_eq!(report.modifications(), 2);
        assert!(!report.is_unchanged());
        assert_eq!(report.changes().count(), 4);
        assert_eq!(
            report.get(&path("mod")).map(|e| e.change_kind),
            Some(ChangeKind::Changed)
        );
    }

    #[test]
    fn deep_input_does_not_overflow() {
        // Every entry owns its full path, so memory grows with depth squared.
        const DEPTH: usize = 3_000;
        let mut left = json!(1);
        let mut right = json!(2);
        for _ in 0..DEPTH {
            left = json!([left]);
            right = json!([right]);
        }
        let report = diff_report(&left, &right);
        assert_eq!(report.len(), DEPTH + 1);
        assert!(report.entries.iter().all(|e| e.change_kind == ChangeKind::Changed));
        let root = report.get(&Path::root()).unwrap();
        assert!(std::ptr::eq(root.left.unwrap(), &left));
        drop(report);
        // serde_json's own Drop is recursive; leak the values instead.
        std::mem::forget(left);
        std::mem::forget(right);
    }

    #[test]
    fn summaries_borrow_both_containers() {
        let left = json!({"a": {"b": 1}});
        let right = json!({"a": {"b": 2}});
        let report = diff_report(&left, &right);
        let summary = report.get(&path("a")).unwrap();
        assert_eq!(summary.change_kind, ChangeKind::Changed);
        assert!(std::ptr::eq(summary.left.unwrap(), &left["a"]));
        assert!(std::ptr::eq(summary.right.unwrap(), &right["a"]));
    }
}
