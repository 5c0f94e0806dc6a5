use thiserror::Error;

/// Errors that abort an expansion.
///
/// Failing to resolve an individual reference is not one of them; see
/// [`ExpandOutcome::failures`](crate::ExpandOutcome::failures).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    /// The expansion's generation was superseded before results were applied.
    #[error("expansion cancelled: generation {started} superseded by {current}")]
    Cancelled { started: u64, current: u64 },

    /// The resolver returned a result list not aligned with its input.
    #[error("resolver returned {actual} results for {expected} references")]
    ResolverArity { expected: usize, actual: usize },
}

/// Errors a [`RefResolver`](crate::RefResolver) may report for a whole batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The backing service could not be reached.
    #[error("resolver unavailable: {0}")]
    Unavailable(String),

    /// The backing service answered with something unusable.
    #[error("resolver backend error: {0}")]
    Backend(String),
}

/// Convenience type alias for expansion operations.
pub type Result<T> = std::result::Result<T, ExpandError>;
