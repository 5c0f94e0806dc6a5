use thiserror::Error;

/// Errors produced by path operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The textual path does not follow the path grammar.
    #[error("malformed path {input:?} at position {position}: {reason}")]
    Malformed {
        input: String,
        position: usize,
        reason: &'static str,
    },
}

/// Convenience type alias for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
