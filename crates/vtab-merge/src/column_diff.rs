//! Per-column change classification over merged rows.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use vtab_types::{deep_equal, ChangeKind, RefPolicy};

use crate::row::Row;

/// Which column each column is compared against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnDiffMode {
    /// Column `i` against column `i - 1`.
    #[default]
    VsPrevious,
    /// Every column against column 0.
    VsBaseline,
}

impl ColumnDiffMode {
    /// Index of the column that column `index` (≥ 1) is compared against.
    pub fn compared_to(self, index: usize) -> usize {
        match self {
            ColumnDiffMode::VsPrevious => index - 1,
            ColumnDiffMode::VsBaseline => 0,
        }
    }
}

/// A [`Row`] with its change classification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowWithDiff<'a> {
    #[serde(flatten)]
    pub row: Row<'a>,
    /// Aggregate over every column after the first.
    pub row_change_kind: ChangeKind,
    pub change_kind_by_column: IndexMap<String, ChangeKind>,
    /// Expandable reference strings among the row's cells, deduplicated in
    /// first-encounter order.
    pub expandable_refs: Vec<String>,
}

impl RowWithDiff<'_> {
    pub fn change_kind(&self, column: &str) -> ChangeKind {
        self.change_kind_by_column
            .get(column)
            .copied()
            .unwrap_or_default()
    }
}

/// Classify every cell of every row against its comparison column.
///
/// Column 0 is always `Unchanged`. For later columns a cell is:
///
/// - `Unchanged` when both cells are missing or deeply equal,
/// - `Added` when only the compared cell is missing,
/// - `Deleted` when only the current cell is missing,
/// - `Changed` otherwise.
///
/// The row's aggregate is `Unchanged` when every column is, the shared kind
/// when all changed columns agree on one, and `Changed` otherwise.
pub fn diff_columns<'a>(
    column_ids: &[String],
    rows: &[Row<'a>],
    mode: ColumnDiffMode,
    policy: &dyn RefPolicy,
) -> Vec<RowWithDiff<'a>> {
    let out: Vec<RowWithDiff<'a>> = rows
        .iter()
        .map(|row| diff_row(column_ids, row, mode, policy))
        .collect();

    debug!(
        rows = out.len(),
        changed = out.iter().filter(|r| r.row_change_kind.is_change()).count(),
        ?mode,
        "column diff complete"
    );
    out
}

fn diff_row<'a>(
    column_ids: &[String],
    row: &Row<'a>,
    mode: ColumnDiffMode,
    policy: &dyn RefPolicy,
) -> RowWithDiff<'a> {
    let mut by_column = IndexMap::with_capacity(column_ids.len());
    for (index, column) in column_ids.iter().enumerate() {
        let kind = if index == 0 {
            ChangeKind::Unchanged
        } else {
            let compared = &column_ids[mode.compared_to(index)];
            cell_change(row.value(compared), row.value(column))
        };
        by_column.insert(column.clone(), kind);
    }

    RowWithDiff {
        row_change_kind: aggregate(by_column.values().copied()),
        change_kind_by_column: by_column,
        expandable_refs: expandable_refs(column_ids, row, policy),
        row: row.clone(),
    }
}

fn cell_change(compared: Option<&Value>, current: Option<&Value>) -> ChangeKind {
    match (compared, current) {
        (None, None) => ChangeKind::Unchanged,
        (None, Some(_)) => ChangeKind::Added,
        (Some(_), None) => ChangeKind::Deleted,
        (Some(a), Some(b)) if deep_equal(a, b) => ChangeKind::Unchanged,
        (Some(_), Some(_)) => ChangeKind::Changed,
    }
}

fn aggregate(kinds: impl Iterator<Item = ChangeKind>) -> ChangeKind {
    let mut result = ChangeKind::Unchanged;
    for kind in kinds.filter(|k| k.is_change()) {
        result = match result {
            ChangeKind::Unchanged => kind,
            current if current == kind => current,
            _ => return ChangeKind::Changed,
        };
    }
    result
}

fn expandable_refs(column_ids: &[String], row: &Row, policy: &dyn RefPolicy) -> Vec<String> {
    let mut refs = IndexSet::new();
    for column in column_ids {
        if let Some(Value::String(s)) = row.value(column) {
            if policy.is_ref(s) && policy.is_expandable(s) {
                refs.insert(s.clone());
            }
        }
    }
    refs.into_iter().collect()
}
