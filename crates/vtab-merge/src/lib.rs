//! N-way merge for vtab.
//!
//! Folds several documents ("columns") into one table of [`Row`]s keyed by
//! path, then classifies every cell against a comparison column.
//!
//! # Key Types
//!
//! - [`merge_columns`] / [`MergeTable`] -- Path-keyed, first-encounter ordered rows
//! - [`Row`] / [`TypeTag`] -- One path's values across columns
//! - [`diff_columns`] / [`RowWithDiff`] -- Per-column change classification
//! - [`MergeConfig`] / [`OpPayloadRule`] -- Marker key and Op payload detection

pub mod column_diff;
pub mod config;
pub mod error;
pub mod merge;
pub mod row;

pub use column_diff::{diff_columns, ColumnDiffMode, RowWithDiff};
pub use config::{MergeConfig, OpPayloadRule};
pub use error::{MergeError, Result};
pub use merge::{merge_columns, merge_table};
pub use row::{MergeTable, Row, TypeTag};
