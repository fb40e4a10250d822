//! # SAGE Session Lifecycle Manager (C8)
//!
//! Sits directly on top of `sage-stores`'s `SessionStore` port: creates
//! sessions handed off by `sage-handshake`, serves lookups and touches for
//! every protected-channel packet, and drives the periodic purge of
//! expired sessions (§4.8).

pub mod cleanup;
pub mod error;
pub mod manager;

pub use cleanup::spawn_cleanup_task;
pub use error::SessionError;
pub use manager::{SessionManager, SessionManagerConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sage_stores::{SessionStore, SessionStoreError};
    use sage_types::did::Did;
    use sage_types::session::{Session, SessionId, SessionState};
    use std::collections::BTreeMap;
    use std::collections::HashMap;
    use std::str::FromStr;
    use time::{Duration, OffsetDateTime};
    use tokio::sync::Mutex;
    use zeroize::Zeroizing;

    struct MapSessionStore(Mutex<HashMap<SessionId, Session>>);

    impl MapSessionStore {
        fn new() -> Self {
            Self(Mutex::new(HashMap::new()))
        }
    }

    #[async_trait]
    impl SessionStore for MapSessionStore {
        async fn create(&self, session: Session) -> Result<(), SessionStoreError> {
            let mut map = self.0.lock().await;
            if map.contains_key(&session.session_id) {
                return Err(SessionStoreError::DuplicateSessionId);
            }
            map.insert(session.session_id, session);
            Ok(())
        }

        async fn get(&self, id: &SessionId, _now: OffsetDateTime) -> Result<Session, SessionStoreError> {
            self.0.lock().await.get(id).cloned().ok_or(SessionStoreError::NotFound)
        }

        async fn update(&self, session: Session) -> Result<(), SessionStoreError> {
            let mut map = self.0.lock().await;
            if !map.contains_key(&session.session_id) {
                return Err(SessionStoreError::NotFound);
            }
            map.insert(session.session_id, session);
            Ok(())
        }

        async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
            self.0.lock().await.remove(id).map(|_| ()).ok_or(SessionStoreError::NotFound)
        }

        async fn touch(&self, id: &SessionId, now: OffsetDateTime) -> Result<(), SessionStoreError> {
            let mut map = self.0.lock().await;
            let session = map.get_mut(id).ok_or(SessionStoreError::NotFound)?;
            session.last_activity = now;
            Ok(())
        }

        async fn purge_expired(&self, now: OffsetDateTime) -> usize {
            let mut map = self.0.lock().await;
            let before = map.len();
            map.retain(|_, s| !s.is_expired(now, Duration::minutes(10)));
            before - map.len()
        }
    }

    fn sample_session(now: OffsetDateTime, state: SessionState) -> Session {
        Session {
            session_id: SessionId::generate(),
            context_id: uuid::Uuid::new_v4(),
            initiator_did: Did::from_str("did:sage:test:550e8400-e29b-41d4-a716-446655440001").unwrap(),
            responder_did: Did::from_str("did:sage:test:550e8400-e29b-41d4-a716-446655440002").unwrap(),
            session_key: Zeroizing::new([0u8; 32]),
            send_counter: 0,
            recv_counter: 0,
            last_activity: now,
            created_at: now,
            expires_at: now + Duration::hours(1),
            state,
            metadata: BTreeMap::new(),
        }
    }

    fn manager() -> SessionManager<MapSessionStore> {
        SessionManager::new(
            MapSessionStore::new(),
            SessionManagerConfig {
                max_age: Duration::hours(1),
                idle_timeout: Duration::minutes(10),
                cleanup_interval: Duration::seconds(30),
            },
        )
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let manager = manager();
        let now = OffsetDateTime::UNIX_EPOCH;
        let session = sample_session(now, SessionState::Active);
        let id = session.session_id;

        manager.create(session).await.unwrap();
        let fetched = manager.get(&id, now + Duration::minutes(1)).await.unwrap();
        assert_eq!(fetched.session_id, id);
    }

    #[tokio::test]
    async fn get_rejects_idle_expired_session() {
        let manager = manager();
        let now = OffsetDateTime::UNIX_EPOCH;
        let session = sample_session(now, SessionState::Active);
        let id = session.session_id;
        manager.create(session).await.unwrap();

        let err = manager.get(&id, now + Duration::minutes(11)).await.unwrap_err();
        assert_eq!(err, SessionError::Expired);
    }

    #[tokio::test]
    async fn close_marks_revoked_and_get_then_rejects() {
        let manager = manager();
        let now = OffsetDateTime::UNIX_EPOCH;
        let session = sample_session(now, SessionState::Active);
        let id = session.session_id;
        manager.create(session).await.unwrap();

        manager.close(&id, now).await.unwrap();
        let err = manager.get(&id, now).await.unwrap_err();
        assert_eq!(err, SessionError::Revoked);
    }

    #[tokio::test]
    async fn touch_refreshes_last_activity() {
        let manager = manager();
        let now = OffsetDateTime::UNIX_EPOCH;
        let session = sample_session(now, SessionState::Active);
        let id = session.session_id;
        manager.create(session).await.unwrap();

        let later = now + Duration::minutes(5);
        manager.touch(&id, later).await.unwrap();
        let fetched = manager.get(&id, later).await.unwrap();
        assert_eq!(fetched.last_activity, later);
    }

    #[tokio::test]
    async fn run_cleanup_purges_expired_sessions() {
        let manager = manager();
        let now = OffsetDateTime::UNIX_EPOCH;
        let session = sample_session(now, SessionState::Active);
        manager.create(session).await.unwrap();

        let removed = manager.run_cleanup(now + Duration::minutes(11)).await;
        assert_eq!(removed, 1);
    }
}
