//! # Driven Port: Session Store
//!
//! Backs session lifecycle management (§4.8): creation on handshake
//! completion, lookup and touch on every protected-channel packet, and
//! periodic purge of expired sessions.

use async_trait::async_trait;
use sage_types::session::{Session, SessionId};
use time::OffsetDateTime;

use crate::error::SessionStoreError;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a newly established session. Fails with
    /// [`SessionStoreError::DuplicateSessionId`] if `session.session_id`
    /// is already present — session ids are generated fresh per
    /// handshake, so a collision indicates a bug upstream, not a benign
    /// race.
    async fn create(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Looks up a session by id. Distinguishes `NotFound` (never existed,
    /// or was deleted) from `Expired` (still present but past
    /// `expires_at` or idle past `idle_timeout` as of `now`) so callers
    /// can produce the right wire error code (§6.6).
    async fn get(&self, id: &SessionId, now: OffsetDateTime) -> Result<Session, SessionStoreError>;

    /// Replaces the stored session with `session` in full (used after
    /// incrementing a counter or transitioning state).
    async fn update(&self, session: Session) -> Result<(), SessionStoreError>;

    /// Removes a session outright, e.g. on explicit revocation.
    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError>;

    /// Updates `last_activity` to `now` without requiring the caller to
    /// round-trip the full session through `get`/`update`.
    async fn touch(&self, id: &SessionId, now: OffsetDateTime) -> Result<(), SessionStoreError>;

    /// Deletes every session expired as of `now`, returning the count
    /// removed. Driven by the background cleanup task (§6.5
    /// `cleanup_interval`).
    async fn purge_expired(&self, now: OffsetDateTime) -> usize;
}
