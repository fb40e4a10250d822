//! An in-memory `SessionStore`, the same shape used inline in several
//! crates' own test modules, promoted here so the workspace integration
//! tests and `sage-gateway`'s tests don't each redefine it.

use std::collections::HashMap;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;

use sage_stores::{SessionStore, SessionStoreError};
use sage_types::session::{Session, SessionId};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: Session) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&session.session_id) {
            return Err(SessionStoreError::DuplicateSessionId);
        }
        sessions.insert(session.session_id, session);
        Ok(())
    }

    async fn get(&self, id: &SessionId, _now: OffsetDateTime) -> Result<Session, SessionStoreError> {
        self.sessions.lock().await.get(id).cloned().ok_or(SessionStoreError::NotFound)
    }

    async fn update(&self, session: Session) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        if !sessions.contains_key(&session.session_id) {
            return Err(SessionStoreError::NotFound);
        }
        sessions.insert(session.session_id, session);
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.lock().await.remove(id).map(|_| ()).ok_or(SessionStoreError::NotFound)
    }

    async fn touch(&self, id: &SessionId, now: OffsetDateTime) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get_mut(id).ok_or(SessionStoreError::NotFound)?;
        session.last_activity = now;
        Ok(())
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, Duration::minutes(10)));
        before - sessions.len()
    }
}
