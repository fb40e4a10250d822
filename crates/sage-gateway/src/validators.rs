//! Per-session validator registry.
//!
//! `sage_validator::MessageValidator::validate` takes `&mut self` — it
//! owns a per-session order/duplicate tracker with no interior
//! mutability — so one instance cannot be shared across sessions the way
//! a stateless verifier could be. This registry keys a `MessageValidator`
//! by `SessionId` in a `DashMap`. Each validator gets its own clone of the
//! shared `NonceStore` handle, since nonce uniqueness (§4.6) is
//! process-wide rather than per-session.

use std::sync::Arc;

use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use sage_stores::NonceStore;
use sage_types::session::SessionId;
use sage_validator::{MessageValidator, ValidatorConfig, ValidationResult};

pub struct ValidatorRegistry<N: NonceStore + Clone> {
    nonce_store: N,
    config: ValidatorConfig,
    validators: DashMap<SessionId, Arc<Mutex<MessageValidator<N>>>>,
}

impl<N: NonceStore + Clone> ValidatorRegistry<N> {
    pub fn new(nonce_store: N, config: ValidatorConfig) -> Self {
        Self {
            nonce_store,
            config,
            validators: DashMap::new(),
        }
    }

    fn validator_for(&self, session_id: SessionId) -> Arc<Mutex<MessageValidator<N>>> {
        let entry = self.validators.entry(session_id).or_insert_with(|| {
            Arc::new(Mutex::new(MessageValidator::new(self.nonce_store.clone(), self.config)))
        });
        entry.value().clone()
    }

    pub async fn validate(
        &self,
        session_id: SessionId,
        now: OffsetDateTime,
        packet_ts: OffsetDateTime,
        nonce: &str,
        message_id: &str,
    ) -> ValidationResult {
        let validator = self.validator_for(session_id);
        let mut guard = validator.lock().await;
        guard.validate(now, packet_ts, nonce, message_id).await
    }

    /// Drops a session's tracker, e.g. once its session is closed or
    /// swept by cleanup — otherwise `validators` would grow unbounded
    /// over a long-running gateway's lifetime.
    pub fn forget(&self, session_id: &SessionId) {
        self.validators.remove(session_id);
    }
}
