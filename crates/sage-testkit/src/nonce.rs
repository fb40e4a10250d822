//! An exact, non-probabilistic `NonceStore` for tests (§4.3's replay
//! checks must be deterministic to assert against, unlike a production
//! store that may use a bloom filter or similar approximate structure).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;

use sage_stores::NonceStore;

/// Wraps its table in an `Arc` so `ExactNonceStore` is cheaply `Clone`:
/// `sage-gateway` hands every per-session `MessageValidator` its own
/// clone, all sharing the one underlying table, since nonce uniqueness
/// per §4.6 is process-wide rather than per-session.
#[derive(Clone, Default)]
pub struct ExactNonceStore {
    seen: Arc<Mutex<HashMap<String, OffsetDateTime>>>,
}

impl ExactNonceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NonceStore for ExactNonceStore {
    async fn check_and_store(&self, nonce: &str, ttl: Duration) -> bool {
        let now = OffsetDateTime::now_utc();
        let mut seen = self.seen.lock().await;
        if let Some(recorded_at) = seen.get(nonce) {
            if now - *recorded_at < ttl {
                return false;
            }
        }
        seen.insert(nonce.to_string(), now);
        true
    }

    async fn purge_expired(&self) {
        let now = OffsetDateTime::now_utc();
        let mut seen = self.seen.lock().await;
        seen.retain(|_, recorded_at| now - *recorded_at < Duration::hours(24));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_nonce_is_accepted_once() {
        let store = ExactNonceStore::new();
        assert!(store.check_and_store("n-1", Duration::minutes(5)).await);
        assert!(!store.check_and_store("n-1", Duration::minutes(5)).await);
    }

    #[tokio::test]
    async fn distinct_nonces_are_independent() {
        let store = ExactNonceStore::new();
        assert!(store.check_and_store("n-1", Duration::minutes(5)).await);
        assert!(store.check_and_store("n-2", Duration::minutes(5)).await);
    }
}
