//! A TTL-bounded caching decorator around any [`DidResolver`].
//!
//! Grounded on the ENR cache pattern (insert-with-timestamp, sweep stale
//! entries on read): negative results are cached too, at a shorter TTL,
//! so a burst of requests for an unregistered DID doesn't hammer the
//! backing registry.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sage_types::agent::AgentRecord;
use sage_types::did::Did;
use tracing::debug;

use crate::error::ResolveError;
use crate::port::DidResolver;

#[derive(Clone)]
enum CachedOutcome {
    Found(AgentRecord),
    NotFound,
}

struct CacheEntry {
    outcome: CachedOutcome,
    inserted_at: Instant,
}

/// Wraps a `DidResolver` with an in-memory, per-process TTL cache.
///
/// `positive_ttl` bounds how long a resolved `AgentRecord` is served from
/// cache before the inner resolver is consulted again; `negative_ttl`
/// does the same for `NotFound` results and should normally be shorter.
pub struct CachingResolver<R> {
    inner: R,
    entries: RwLock<HashMap<Did, CacheEntry>>,
    positive_ttl: Duration,
    negative_ttl: Duration,
}

impl<R: DidResolver> CachingResolver<R> {
    pub fn new(inner: R, positive_ttl: Duration, negative_ttl: Duration) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
            positive_ttl,
            negative_ttl,
        }
    }

    /// Evicts any cached entry for `did`, forcing the next `resolve` call
    /// to consult the inner resolver. Used when a caller learns out of
    /// band that an agent record changed (e.g. a revocation notice).
    pub fn invalidate(&self, did: &Did) {
        self.entries.write().expect("cache lock poisoned").remove(did);
    }

    fn cached(&self, did: &Did) -> Option<CachedOutcome> {
        let entries = self.entries.read().expect("cache lock poisoned");
        let entry = entries.get(did)?;
        let ttl = match entry.outcome {
            CachedOutcome::Found(_) => self.positive_ttl,
            CachedOutcome::NotFound => self.negative_ttl,
        };
        if entry.inserted_at.elapsed() < ttl {
            Some(entry.outcome.clone())
        } else {
            None
        }
    }

    fn store(&self, did: Did, outcome: CachedOutcome) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            did,
            CacheEntry {
                outcome,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drops every entry past its TTL. Intended to be driven by the same
    /// background cleanup cadence as the session and nonce stores
    /// (§6.5 `cleanup_interval`), so the cache doesn't grow unbounded
    /// across long-lived processes.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| {
            let ttl = match entry.outcome {
                CachedOutcome::Found(_) => self.positive_ttl,
                CachedOutcome::NotFound => self.negative_ttl,
            };
            entry.inserted_at.elapsed() < ttl
        });
        before - entries.len()
    }
}

#[async_trait]
impl<R: DidResolver> DidResolver for CachingResolver<R> {
    async fn resolve(&self, did: &Did) -> Result<AgentRecord, ResolveError> {
        if let Some(outcome) = self.cached(did) {
            debug!(did = %did, "resolver cache hit");
            return match outcome {
                CachedOutcome::Found(record) => Ok(record),
                CachedOutcome::NotFound => Err(ResolveError::NotFound),
            };
        }

        match self.inner.resolve(did).await {
            Ok(record) => {
                self.store(did.clone(), CachedOutcome::Found(record.clone()));
                Ok(record)
            }
            Err(ResolveError::NotFound) => {
                self.store(did.clone(), CachedOutcome::NotFound);
                Err(ResolveError::NotFound)
            }
            Err(other) => Err(other),
        }
    }
}
