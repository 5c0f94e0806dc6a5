//! Reference expansion for vtab.
//!
//! Documents may contain reference strings standing in for other
//! documents. The [`Expander`] collects every reference, resolves them in
//! one batch through a [`RefResolver`], substitutes the resolutions into the
//! documents, and repeats until a pass substitutes nothing.
//!
//! # Key Types
//!
//! - [`Expander`] / [`ExpandOutcome`] -- The fixpoint loop and its result
//! - [`RefResolver`] / [`StaticResolver`] -- The resolution seam
//! - [`Generation`] -- Cancellation of abandoned expansions
//! - [`ExpandConfig`] -- Marker key and pass cap

pub mod config;
pub mod error;
pub mod expander;
pub mod generation;
pub mod resolver;

pub use config::ExpandConfig;
pub use error::{ExpandError, ResolveError, Result};
pub use expander::{ExpandOutcome, Expander};
pub use generation::Generation;
pub use resolver::{RefResolver, StaticResolver};
