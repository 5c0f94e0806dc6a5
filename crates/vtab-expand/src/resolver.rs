use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ResolveError;

/// Resolves reference strings to documents.
///
/// The result is positionally aligned with `refs`. `None` marks a
/// reference that could not be resolved; the expander leaves it
/// unexpanded. An `Err` fails the whole batch the same way.
#[async_trait]
pub trait RefResolver: Send + Sync {
    async fn resolve(&self, refs: &[String]) -> Result<Vec<Option<Value>>, ResolveError>;
}

/// An in-memory [`RefResolver`] for tests and local use.
///
/// Every batch it is asked for is recorded and available through
/// [`StaticResolver::calls`].
#[derive(Debug, Default)]
pub struct StaticResolver {
    documents: HashMap<String, Value>,
    calls: RwLock<Vec<Vec<String>>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` as the resolution of `reference`.
    pub fn with(mut self, reference: impl Into<String>, value: Value) -> Self {
        self.insert(reference, value);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, value: Value) {
        self.documents.insert(reference.into(), value);
    }

    /// Batches requested so far, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .read()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RefResolver for StaticResolver {
    async fn resolve(&self, refs: &[String]) -> Result<Vec<Option<Value>>, ResolveError> {
        self.calls
            .write()
            .map_err(|e| ResolveError::Backend(format!("lock poisoned: {e}")))?
            .push(refs.to_vec());
        Ok(refs.iter().map(|r| self.documents.get(r).cloned()).collect())
    }
}
