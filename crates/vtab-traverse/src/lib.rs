//! Traversal engine for vtab.
//!
//! [`traverse`] walks a value tree depth-first with an explicit work stack,
//! handing each node to a visitor as a [`TraverseContext`]. The visitor
//! steers the walk with [`Visit`]. [`map_object`] builds a new tree by
//! rewriting nodes path by path.

pub mod context;
pub mod map;
pub mod walk;

pub use context::{TraverseContext, TraverseStats, Visit};
pub use map::{map_object, Mapped};
pub use walk::traverse;
