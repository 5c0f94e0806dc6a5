//! Path model for vtab.
//!
//! A [`Path`] is an ordered sequence of [`PathElement`]s (object keys and
//! array indices) addressing one node in a value tree. Paths have a
//! canonical textual form used as the row identity everywhere else in vtab:
//!
//! ```text
//! users[0].name          Key("users"), Index(0), Key("name")
//! a\.b.c                 Key("a.b"), Key("c")
//! matrix[1][2]           Key("matrix"), Index(1), Index(2)
//! ```
//!
//! Keys escape `.`, `[`, `]` and `\` with a backslash. A purely numeric key
//! (`"0"`) is distinct from an index (`[0]`) and round-trips as such.

pub mod access;
pub mod element;
pub mod error;
pub mod parse;
pub mod path;

pub use element::PathElement;
pub use error::{PathError, Result};
pub use path::Path;
