//! Shared fixtures for the integration suite: two pre-resolved agents, a
//! session pre-seated in the store (bypassing the handshake so scenarios
//! that only care about the protected channel don't have to run one), and
//! a signed-and-sealed packet builder matching §6.1's wire shape.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use time::OffsetDateTime;
use zeroize::Zeroizing;

use sage_crypto::signing::SigningKeypair;
use sage_crypto::{seal_with_session_key, sha256};
use sage_gateway::{Gateway, GatewayConfig, InboundRequest, MessageHandler};
use sage_session::{SessionManager, SessionManagerConfig};
use sage_signature::{sign_envelope, SignatureInput};
use sage_testkit::{agent_record, ExactNonceStore, InMemoryResolver, InMemorySessionStore};
use sage_types::agent::AgentRecord;
use sage_types::envelope::{format_http_date, PacketEnvelope};
use sage_types::error::CoreError;
use sage_types::session::{Session, SessionId, SessionState};
use sage_validator::ValidatorConfig;

pub const INITIATOR_DID: &str = "did:sage:test:550e8400-e29b-41d4-a716-446655440001";
pub const RESPONDER_DID: &str = "did:sage:test:550e8400-e29b-41d4-a716-446655440002";

/// Echoes whatever plaintext it's handed back at the caller — stands in
/// for an embedder's application logic, which the protected channel
/// never needs to know about.
pub struct EchoHandler;

#[async_trait]
impl MessageHandler for EchoHandler {
    async fn handle(&self, _session: &Session, plaintext: Vec<u8>) -> Result<Vec<u8>, CoreError> {
        Ok(plaintext)
    }
}

pub fn validator_config() -> ValidatorConfig {
    ValidatorConfig {
        timestamp_tolerance: time::Duration::minutes(5),
        nonce_ttl: time::Duration::minutes(5),
        max_out_of_order_window: time::Duration::seconds(5),
        duplicate_ttl: time::Duration::minutes(5),
    }
}

pub fn gateway_config() -> GatewayConfig {
    GatewayConfig {
        max_clock_skew: time::Duration::minutes(5),
        nonce_ttl: time::Duration::minutes(5),
    }
}

fn session_manager_config() -> SessionManagerConfig {
    SessionManagerConfig {
        max_age: time::Duration::hours(1),
        idle_timeout: time::Duration::minutes(10),
        cleanup_interval: time::Duration::seconds(30),
    }
}

pub type TestGateway = Gateway<InMemoryResolver, ExactNonceStore, InMemorySessionStore, EchoHandler>;

/// A fully wired protected channel with one pre-established `Active`
/// session between [`INITIATOR_DID`] and [`RESPONDER_DID`].
pub struct Harness {
    pub gateway: TestGateway,
    pub sessions: Arc<SessionManager<InMemorySessionStore>>,
    pub initiator: AgentRecord,
    pub initiator_keys: SigningKeypair,
    pub responder: AgentRecord,
    pub session_id: SessionId,
    pub session_key: [u8; 32],
}

/// Builds a [`Harness`] whose session's `idle_timeout` is overridden —
/// the idle-expiry scenario needs a shorter window than the other
/// scenarios' default ten minutes.
pub async fn harness_with_idle_timeout(now: OffsetDateTime, idle_timeout: time::Duration) -> Harness {
    let (initiator, initiator_keys, _) = agent_record(INITIATOR_DID);
    let (responder, _, _) = agent_record(RESPONDER_DID);

    let resolver = InMemoryResolver::new();
    resolver.insert(initiator.clone()).await;
    resolver.insert(responder.clone()).await;

    let session_id = SessionId::generate();
    let session_key = [7u8; 32];
    let session = Session {
        session_id,
        context_id: uuid::Uuid::new_v4(),
        initiator_did: initiator.did.clone(),
        responder_did: responder.did.clone(),
        session_key: Zeroizing::new(session_key),
        send_counter: 0,
        recv_counter: 0,
        last_activity: now,
        created_at: now,
        expires_at: now + time::Duration::hours(1),
        state: SessionState::Active,
        metadata: BTreeMap::new(),
    };

    let store = InMemorySessionStore::new();
    let mut manager_config = session_manager_config();
    manager_config.idle_timeout = idle_timeout;
    let sessions = Arc::new(SessionManager::new(store, manager_config));
    sessions.create(session).await.unwrap();

    let gateway = Gateway::new(
        resolver,
        ExactNonceStore::new(),
        sessions.clone(),
        validator_config(),
        EchoHandler,
        16,
        Arc::new(sage_audit::TracingSink),
        gateway_config(),
    );

    Harness {
        gateway,
        sessions,
        initiator,
        initiator_keys,
        responder,
        session_id,
        session_key,
    }
}

pub async fn harness(now: OffsetDateTime) -> Harness {
    harness_with_idle_timeout(now, time::Duration::minutes(10)).await
}

/// Seals `plaintext` under the session key at `sequence` and wraps it in a
/// signed [`InboundRequest`], exactly as an embedder's own HTTP layer
/// would assemble one from the RFC 9421 headers and ciphertext body.
pub fn build_request(
    harness: &Harness,
    plaintext: &[u8],
    sequence: u64,
    nonce: &str,
    created_ts: i64,
) -> InboundRequest {
    let ciphertext = seal_with_session_key(
        &harness.session_key,
        harness.session_id.as_uuid().as_bytes(),
        sequence,
        harness.initiator.did.as_str().as_bytes(),
        plaintext,
    )
    .unwrap();

    let content_digest = format!("sha-256=:{}:", BASE64.encode(sha256(&ciphertext)));
    let envelope_base = PacketEnvelope {
        method: "POST".to_string(),
        authority: "agent.example".to_string(),
        path: "/sage/v1/messages".to_string(),
        content_type: "application/json".to_string(),
        content_length: ciphertext.len() as u64,
        content_digest,
        date: format_http_date(OffsetDateTime::from_unix_timestamp(created_ts).unwrap()),
        created_ts,
        nonce: nonce.to_string(),
        key_id: harness.session_id.to_string(),
        signature: String::new(),
    };
    let input = SignatureInput {
        created: envelope_base.created_ts,
        keyid: envelope_base.key_id.clone(),
        nonce: envelope_base.nonce.clone(),
    };
    let signature = sign_envelope(&envelope_base, &input, &harness.initiator_keys);
    let envelope = PacketEnvelope {
        signature: signature.to_string(),
        ..envelope_base
    };

    InboundRequest {
        envelope,
        sender_did: harness.initiator.did.as_str().to_string(),
        body: ciphertext,
    }
}
