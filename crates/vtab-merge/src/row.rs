use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use vtab_path::Path;
use vtab_types::ValueKind;

/// Type of one cell in a [`Row`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeTag {
    /// The column holds a value of this kind.
    Kind(ValueKind),
    /// The column has no value at this path.
    Missing,
    /// The synthetic code-reference cell of an Op payload.
    Code,
}

impl TypeTag {
    pub fn is_missing(self) -> bool {
        self == TypeTag::Missing
    }
}

/// One path's values across all merged columns.
///
/// Cells borrow from the merged documents; a container cell is the
/// document's own subtree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Row<'a> {
    /// `path.to_string()`; the row's identity.
    pub key: String,
    pub path: Path,
    pub values: IndexMap<String, &'a Value>,
    pub type_tags: IndexMap<String, TypeTag>,
    /// Marks the synthetic code row of an Op payload.
    pub is_code: bool,
}

impl<'a> Row<'a> {
    pub fn new(path: Path) -> Self {
        Self {
            key: path.to_string(),
            path,
            values: IndexMap::new(),
            type_tags: IndexMap::new(),
            is_code: false,
        }
    }

    pub fn value(&self, column: &str) -> Option<&'a Value> {
        self.values.get(column).copied()
    }

    /// The cell's tag; `Missing` for columns the row has never seen.
    pub fn type_tag(&self, column: &str) -> TypeTag {
        self.type_tags.get(column).copied().unwrap_or(TypeTag::Missing)
    }

    /// Unescaped path elements, for tree-grouping consumers.
    pub fn group_keys(&self) -> Vec<String> {
        self.path.to_string_array()
    }
}

/// Rows keyed by path string, in first-encounter order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeTable<'a> {
    rows: IndexMap<String, Row<'a>>,
}

impl<'a> MergeTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `column` at `path`, creating the row on first
    /// sight. A later write to the same cell overwrites it.
    pub fn upsert(&mut self, path: &Path, column: &str, value: &'a Value, tag: TypeTag, is_code: bool) {
        let row = self
            .rows
            .entry(path.to_string())
            .or_insert_with(|| Row::new(path.clone()));
        row.is_code |= is_code;
        row.values.insert(column.to_string(), value);
        row.type_tags.insert(column.to_string(), tag);
    }

    /// Tag every absent cell as `Missing`, in column order.
    pub fn fill_missing(&mut self, columns: &[String]) {
        for row in self.rows.values_mut() {
            let mut tags = IndexMap::with_capacity(columns.len());
            for column in columns {
                tags.insert(column.clone(), row.type_tag(column));
            }
            row.type_tags = tags;
        }
    }

    pub fn get(&self, key: &str) -> Option<&Row<'a>> {
        self.rows.get(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row<'a>> {
        self.rows.values()
    }

    pub fn into_rows(self) -> Vec<Row<'a>> {
        self.rows.into_values().collect()
    }
}
