//! The session lifecycle manager: create/get/touch/close on top of a
//! [`SessionStore`], plus the config-driven expiry checks of §4.8 (I2:
//! absolute max-age and idle timeout).

use time::{Duration, OffsetDateTime};
use tracing::{debug, instrument};

use sage_stores::SessionStore;
use sage_types::config::SageConfig;
use sage_types::session::{Session, SessionId, SessionState};

use crate::error::SessionError;

/// The handful of `SageConfig` tunables this manager needs, copied out
/// rather than borrowing the whole config so `SessionManager` doesn't
/// carry a lifetime parameter.
#[derive(Debug, Clone, Copy)]
pub struct SessionManagerConfig {
    pub max_age: Duration,
    pub idle_timeout: Duration,
    pub cleanup_interval: Duration,
}

impl From<&SageConfig> for SessionManagerConfig {
    fn from(config: &SageConfig) -> Self {
        Self {
            max_age: config.max_age,
            idle_timeout: config.idle_timeout,
            cleanup_interval: config.cleanup_interval,
        }
    }
}

pub struct SessionManager<S: SessionStore> {
    store: S,
    config: SessionManagerConfig,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S, config: SessionManagerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> SessionManagerConfig {
        self.config
    }

    /// Persists a freshly completed handshake's session.
    #[instrument(skip_all, fields(session_id = %session.session_id))]
    pub async fn create(&self, session: Session) -> Result<(), SessionError> {
        self.store.create(session).await.map_err(SessionError::from)
    }

    /// Looks up a session, rejecting it if past either expiry boundary
    /// (I2) or already `Revoked`, even if the store itself hasn't yet
    /// swept it.
    pub async fn get(&self, id: &SessionId, now: OffsetDateTime) -> Result<Session, SessionError> {
        let session = self.store.get(id, now).await?;
        if session.state == SessionState::Revoked {
            return Err(SessionError::Revoked);
        }
        if session.is_expired(now, self.config.idle_timeout) {
            return Err(SessionError::Expired);
        }
        Ok(session)
    }

    /// Refreshes `last_activity` after a successfully validated inbound
    /// packet (§4.8 "on every successful validated packet").
    pub async fn touch(&self, id: &SessionId, now: OffsetDateTime) -> Result<(), SessionError> {
        self.store.touch(id, now).await.map_err(SessionError::from)
    }

    /// Persists a session whose caller has already mutated in memory
    /// (e.g. `sage-gateway` bumping `send_counter`/`recv_counter` around
    /// a packet exchange) rather than round-tripping through `get` again.
    pub async fn update(&self, session: Session) -> Result<(), SessionError> {
        self.store.update(session).await.map_err(SessionError::from)
    }

    /// Explicitly revokes a session. Once `Revoked`, a session never
    /// returns to `Active` (I3) — callers that want a fresh session must
    /// run a new handshake.
    #[instrument(skip(self))]
    pub async fn close(&self, id: &SessionId, now: OffsetDateTime) -> Result<(), SessionError> {
        let mut session = self.store.get(id, now).await?;
        session.state = SessionState::Revoked;
        self.store.update(session).await.map_err(SessionError::from)
    }

    /// Runs one sweep of the background cleanup (§6.5
    /// `cleanup_interval`), returning the number of sessions removed.
    pub async fn run_cleanup(&self, now: OffsetDateTime) -> usize {
        let removed = self.store.purge_expired(now).await;
        if removed > 0 {
            debug!(removed, "purged expired sessions");
        }
        removed
    }
}
