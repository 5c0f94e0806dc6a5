use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use vtab_traverse::{map_object, traverse, Mapped, Visit};
use vtab_types::RefPolicy;

use crate::config::ExpandConfig;
use crate::error::{ExpandError, ResolveError, Result};
use crate::generation::Generation;
use crate::resolver::RefResolver;

/// The result of an expansion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpandOutcome {
    /// The input documents with every resolvable reference substituted.
    pub documents: Vec<Value>,
    /// Every successful resolution, wrapped with the marker key, by
    /// reference.
    pub resolved: IndexMap<String, Value>,
    /// References the resolver could not resolve. Their raw strings remain
    /// in the documents.
    pub failures: Vec<String>,
    /// Substitution passes run.
    pub passes: usize,
    pub resolver_calls: usize,
    /// `false` if the pass cap stopped the loop before a fixpoint.
    pub complete: bool,
}

/// Drives the reference expansion fixpoint loop.
pub struct Expander {
    resolver: Arc<dyn RefResolver>,
    policy: Arc<dyn RefPolicy>,
    config: ExpandConfig,
}

impl Expander {
    pub fn new(
        resolver: Arc<dyn RefResolver>,
        policy: Arc<dyn RefPolicy>,
        config: ExpandConfig,
    ) -> Self {
        Self {
            resolver,
            policy,
            config,
        }
    }

    pub fn config(&self) -> &ExpandConfig {
        &self.config
    }

    /// Expand every reference in `documents` until a fixpoint.
    ///
    /// Each pass collects the references reachable in the documents plus
    /// `requested`, resolves the ones not seen before in a single resolver
    /// call, and substitutes every string leaf equal to a resolved
    /// reference. The loop ends after the first pass that substitutes
    /// nothing. With no references at all it returns without running a
    /// pass or calling the resolver.
    ///
    /// If `generation` moves on while the expansion runs, it stops with
    /// [`ExpandError::Cancelled`] before applying any further results.
    pub async fn expand(
        &self,
        documents: &[Value],
        requested: &[String],
        generation: &Generation,
    ) -> Result<ExpandOutcome> {
        let started = generation.current();
        let mut outcome = ExpandOutcome {
            documents: documents.to_vec(),
            resolved: IndexMap::new(),
            failures: Vec::new(),
            passes: 0,
            resolver_calls: 0,
            complete: true,
        };
        let mut failed: IndexSet<String> = IndexSet::new();

        loop {
            let mut refs = self.collect_refs(&outcome.documents);
            refs.extend(requested.iter().cloned());
            if outcome.passes == 0 && refs.is_empty() {
                debug!("no references to expand");
                return Ok(outcome);
            }
            if outcome.passes >= self.config.max_passes {
                warn!(
                    passes = outcome.passes,
                    "reference expansion hit the pass cap before reaching a fixpoint"
                );
                outcome.complete = false;
                break;
            }

            let pending: Vec<String> = refs
                .into_iter()
                .filter(|r| !outcome.resolved.contains_key(r) && !failed.contains(r))
                .collect();
            if !pending.is_empty() {
                outcome.resolver_calls += 1;
                let results = self.resolver.resolve(&pending).await;
                ensure_current(generation, started)?;
                self.record(results, pending, &mut outcome, &mut failed)?;
            }

            ensure_current(generation, started)?;
            let mut substituted = 0usize;
            outcome.documents = outcome
                .documents
                .iter()
                .map(|doc| self.substitute(doc, &outcome.resolved, &mut substituted))
                .collect();
            outcome.passes += 1;
            debug!(pass = outcome.passes, substituted, "expansion pass complete");

            if substituted == 0 {
                break;
            }
        }

        outcome.failures = failed.into_iter().collect();
        Ok(outcome)
    }

    /// Every reference string reachable in `documents`, outside marker keys.
    fn collect_refs(&self, documents: &[Value]) -> IndexSet<String> {
        let mut refs = IndexSet::new();
        for document in documents {
            traverse(document, |ctx| {
                if ctx.path.tail().is_some_and(|t| t.is_key(&self.config.marker_key)) {
                    return Visit::Skip;
                }
                if let Some(s) = ctx.as_str() {
                    if self.policy.is_ref(s) {
                        refs.insert(s.to_string());
                    }
                }
                Visit::Continue
            });
        }
        refs
    }

    fn record(
        &self,
        results: std::result::Result<Vec<Option<Value>>, ResolveError>,
        pending: Vec<String>,
        outcome: &mut ExpandOutcome,
        failed: &mut IndexSet<String>,
    ) -> Result<()> {
        let values = match results {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, count = pending.len(), "resolver call failed; leaving references unexpanded");
                failed.extend(pending);
                return Ok(());
            }
        };
        if values.len() != pending.len() {
            return Err(ExpandError::ResolverArity {
                expected: pending.len(),
                actual: values.len(),
            });
        }

        for (reference, value) in pending.into_iter().zip(values) {
            match value {
                Some(value) => {
                    let wrapped = wrap(&reference, value, &self.config.marker_key);
                    outcome.resolved.insert(reference, wrapped);
                }
                None => {
                    warn!(reference = %reference, "reference could not be resolved; leaving it unexpanded");
                    failed.insert(reference);
                }
            }
        }
        Ok(())
    }

    /// One substitution pass over a document.
    fn substitute(
        &self,
        document: &Value,
        resolved: &IndexMap<String, Value>,
        substituted: &mut usize,
    ) -> Value {
        if let Some(wrapped) = document.as_str().and_then(|s| resolved.get(s)) {
            *substituted += 1;
            return wrapped.clone();
        }
        map_object(document, |ctx| {
            if ctx.path.tail().is_some_and(|t| t.is_key(&self.config.marker_key)) {
                return Mapped::Replace(ctx.value.clone());
            }
            match ctx.as_str().and_then(|s| resolved.get(s)) {
                Some(wrapped) => {
                    *substituted += 1;
                    Mapped::Replace(wrapped.clone())
                }
                None => Mapped::Keep,
            }
        })
    }
}

fn ensure_current(generation: &Generation, started: u64) -> Result<()> {
    if generation.is_current(started) {
        Ok(())
    } else {
        Err(ExpandError::Cancelled {
            started,
            current: generation.current(),
        })
    }
}

/// Attach provenance to a resolution.
///
/// Objects get the marker key added. Anything else is wrapped in an object
/// under the empty key so it stays path-addressable.
fn wrap(reference: &str, value: Value, marker_key: &str) -> Value {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            let mut object = Map::new();
            object.insert(String::new(), other);
            object
        }
    };
    object.insert(marker_key.to_string(), Value::String(reference.to_string()));
    Value::Object(object)
}
