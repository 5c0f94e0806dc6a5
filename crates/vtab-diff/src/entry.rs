use serde::Serialize;
use serde_json::Value;
use vtab_path::Path;
use vtab_types::ChangeKind;

/// One path's change classification.
///
/// Comparisons and container summaries carry both sides; `Added` carries
/// only `right`, `Deleted` only `left`. Values are borrowed from the two
/// compared documents.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffEntry<'a> {
    pub change_kind: ChangeKind,
    pub path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<&'a Value>,
}

impl<'a> DiffEntry<'a> {
    pub fn new(
        change_kind: ChangeKind,
        path: Path,
        left: Option<&'a Value>,
        right: Option<&'a Value>,
    ) -> Self {
        Self {
            change_kind,
            path,
            left,
            right,
        }
    }

    pub(crate) fn summary(path: Path, changed: bool, left: &'a Value, right: &'a Value) -> Self {
        let kind = if changed {
            ChangeKind::Changed
        } else {
            ChangeKind::Unchanged
        };
        Self::new(kind, path, Some(left), Some(right))
    }
}

/// The result of a structural diff.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffReport<'a> {
    pub entries: Vec<DiffEntry<'a>>,
}

impl<'a> DiffReport<'a> {
    pub fn new(entries: Vec<DiffEntry<'a>>) -> Self {
        Self { entries }
    }

    /// Returns `true` if no entry reports a change.
    pub fn is_unchanged(&self) -> bool {
        self.entries.iter().all(|e| !e.change_kind.is_change())
    }

    /// Entries other than `Unchanged`, in emission order.
    pub fn changes(&self) -> impl Iterator<Item = &DiffEntry<'a>> {
        self.entries.iter().filter(|e| e.change_kind.is_change())
    }

    /// The entry for `path`, if one was emitted.
    pub fn get(&self, path: &Path) -> Option<&DiffEntry<'a>> {
        self.entries.iter().find(|e| &e.path == path)
    }

    /// Number of added keys or indices.
    pub fn additions(&self) -> usize {
        self.count(ChangeKind::Added)
    }

    /// Number of deleted keys or indices.
    pub fn deletions(&self) -> usize {
        self.count(ChangeKind::Deleted)
    }

    /// Number of changed entries, container summaries included.
    pub fn modifications(&self) -> usize {
        self.count(ChangeKind::Changed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn count(&self, kind: ChangeKind) -> usize {
        self.entries.iter().filter(|e| e.change_kind == kind).count()
    }
}
