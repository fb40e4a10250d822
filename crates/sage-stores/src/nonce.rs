//! # Driven Port: Nonce Replay Store
//!
//! Per §4.6, the RFC 9421 signature nonce and the per-session packet
//! nonce are the same value and share one table, so `sage-signature` and
//! `sage-validator` both call this one port rather than maintaining two
//! nonce tables.

use async_trait::async_trait;
use time::Duration;

/// Tracks nonces seen within their retention window to reject replays.
///
/// Implementations must treat `check_and_store` as atomic: two concurrent
/// callers racing on the same nonce must not both observe "fresh".
#[async_trait]
pub trait NonceStore: Send + Sync {
    /// Records `nonce` if it has not been seen within `ttl`, returning
    /// `true` if it was fresh (and is now recorded) or `false` if it is a
    /// replay of a nonce already recorded within its retention window.
    async fn check_and_store(&self, nonce: &str, ttl: Duration) -> bool;

    /// Drops nonce records past their retention window. Driven by the
    /// same background cleanup cadence as the session store
    /// (§6.5 `cleanup_interval`).
    async fn purge_expired(&self);
}
