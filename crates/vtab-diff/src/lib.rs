//! Structural differ for vtab.
//!
//! Compares two value trees and produces a flat list of [`DiffEntry`]s keyed
//! by [`Path`](vtab_path::Path): one entry per compared leaf, one per key or
//! index present on only one side, and one summary entry per pair of
//! compared containers.
//!
//! # Key Types
//!
//! - [`diff`] -- Pairwise deep diff
//! - [`DiffEntry`] -- One path's change classification
//! - [`DiffReport`] -- Entry list with change counters

pub mod entry;
pub mod structural;

pub use entry::{DiffEntry, DiffReport};
pub use structural::{diff, diff_report};
pub use vtab_types::ChangeKind;
