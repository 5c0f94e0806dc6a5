use thiserror::Error;

/// Errors that can occur while merging documents into columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// Column ids and documents must be index-aligned.
    #[error("column count mismatch: {columns} column ids for {documents} documents")]
    ColumnMismatch { columns: usize, documents: usize },

    /// Column ids key every row's cells and must be unique.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
}

/// Convenience type alias for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;
