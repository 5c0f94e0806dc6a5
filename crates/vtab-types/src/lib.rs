//! Foundation types for vtab.
//!
//! This crate provides the small shared vocabulary every other vtab crate
//! speaks: how a node is classified, how a change is classified, what
//! "equal" means for two values, and how reference strings are recognised.
//!
//! # Key Types
//!
//! - [`ValueKind`] -- Closed classification of a node, decided once per visit
//! - [`ChangeKind`] -- Unchanged / Added / Deleted / Changed
//! - [`same_value`] / [`deep_equal`] -- Same-value comparison (`-0 != +0`, `NaN == NaN`)
//! - [`RefPolicy`] / [`PrefixRefPolicy`] -- Reference recognition predicates

pub mod change;
pub mod equality;
pub mod kind;
pub mod policy;

pub use change::ChangeKind;
pub use equality::{deep_equal, same_number, same_value};
pub use kind::ValueKind;
pub use policy::{PrefixRefPolicy, RefPolicy, DEFAULT_MARKER_KEY};

/// The value model shared by every vtab crate.
pub use serde_json::Value;
