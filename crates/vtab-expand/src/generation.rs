use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared generation counter used to abandon stale expansions.
///
/// An expansion records the generation when it starts and refuses to apply
/// resolver results once the counter has moved on. Callers advance the
/// counter whenever the inputs change. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Invalidate every expansion started before this call. Returns the new
    /// generation.
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, started: u64) -> bool {
        self.current() == started
    }
}
