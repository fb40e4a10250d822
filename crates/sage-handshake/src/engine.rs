//! The HPKE three-phase handshake engine (C7).
//!
//! One `HandshakeEngine` is shared (behind an `Arc`, by convention of its
//! caller) across every in-flight handshake a node is party to. Pending
//! state is keyed by `context_id`, the correlation identifier the
//! initiator mints for the `Invitation` phase and that is carried
//! unchanged through `Request` and `Complete` (§4.7).
//!
//! Pending state lives in a `Mutex<HashMap<...>>` guarding short-lived
//! per-exchange state, swept by a `purge_timed_out` call a caller drives
//! from its own maintenance loop rather than this crate spawning a
//! background task of its own.
//!
//! Every phase method verifies its incoming [`SignedPhase`] before
//! touching any pending state (H1) and signs whatever phase it produces
//! in turn, using the resolved sender's `sign_public_key` for
//! verification and the caller-supplied [`SigningKeypair`] for signing.

use std::collections::BTreeMap;
use std::collections::HashMap;

use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use uuid::Uuid;
use zeroize::Zeroizing;

use sage_crypto::kem::{KemPrivateKey, KemPublicKey};
use sage_crypto::signing::SigningKeypair;
use sage_crypto::{hkdf_sha256, hpke_open, hpke_seal};
use sage_resolver::DidResolver;
use sage_types::did::Did;
use sage_types::session::{Session, SessionId, SessionState};

use crate::auth::{body_b64_json, body_b64_sealed, sign_phase, verify_phase, SignedPhase};
use crate::error::HandshakeError;
use crate::payload::{CompleteConfirmation, InvitationPayload, RequestInner, ResponseInner, SealedPayload};
use crate::state::HandshakeState;

const INFO_REQUEST: &[u8] = b"sage/handshake/request/v1";
const INFO_RESPONSE: &[u8] = b"sage/handshake/response/v1";
const INFO_SESSION: &[u8] = b"sage/handshake/session/v1";

fn session_key_info(context_id: Uuid) -> Vec<u8> {
    let mut info = INFO_SESSION.to_vec();
    info.extend_from_slice(context_id.as_bytes());
    info
}

/// Drives the `Invitation` -> `Request` -> `Complete` state machine for
/// both roles a node can play in a handshake.
pub struct HandshakeEngine<R: DidResolver> {
    resolver: R,
    pending: Mutex<HashMap<Uuid, HandshakeState>>,
    handshake_timeout: Duration,
}

impl<R: DidResolver> HandshakeEngine<R> {
    pub fn new(resolver: R, handshake_timeout: Duration) -> Self {
        Self {
            resolver,
            pending: Mutex::new(HashMap::new()),
            handshake_timeout,
        }
    }

    /// Responder side, phase one: verify the `Invitation`'s signature
    /// (H1) and record that `initiator_did` wants to start a handshake.
    /// Fails if the signature doesn't check out, if `initiator_did`'s
    /// agent record cannot be resolved or is unusable, or if `context_id`
    /// is already in use.
    pub async fn responder_handle_invitation(
        &self,
        context_id: Uuid,
        phase: SignedPhase<InvitationPayload>,
        responder_did: Did,
        now: OffsetDateTime,
    ) -> Result<(), HandshakeError> {
        let SignedPhase { payload, timestamp, signature } = phase;
        let initiator_did = Did::parse(payload.sender_did.clone())?;
        let initiator_record = self.resolver.resolve(&initiator_did).await?;

        let body_b64 = body_b64_json(&payload)?;
        verify_phase(&initiator_did, &responder_did, &body_b64, timestamp, &signature, initiator_record.sign_public_key.as_slice())?;

        let mut pending = self.pending.lock().await;
        if pending.contains_key(&context_id) {
            return Err(HandshakeError::ProtocolViolation);
        }
        pending.insert(
            context_id,
            HandshakeState::Invited {
                initiator_did,
                responder_did,
                metadata: payload.metadata,
                started_at: now,
            },
        );
        Ok(())
    }

    /// Initiator side, phase two: generate a fresh ephemeral X25519
    /// keypair (H2), seal a `RequestInner` to the responder's long-term
    /// KEM key, and sign the sealed phase with `initiator_keys` (H1).
    pub async fn initiator_begin_request(
        &self,
        context_id: Uuid,
        initiator_did: Did,
        responder_did: Did,
        responder_kem_pub: &KemPublicKey,
        initiator_keys: &SigningKeypair,
        now: OffsetDateTime,
    ) -> Result<SignedPhase<SealedPayload>, HandshakeError> {
        let (ie_priv, ie_pub) = KemPrivateKey::generate();

        let inner = RequestInner {
            sender_did: initiator_did.to_string(),
            ie_pub: ie_pub.to_bytes(),
            timestamp: now.unix_timestamp(),
        };
        let plaintext = serde_json::to_vec(&inner)?;
        let (enc, ciphertext) =
            hpke_seal(responder_kem_pub, INFO_REQUEST, context_id.as_bytes(), &plaintext)?;

        let mut pending = self.pending.lock().await;
        pending.insert(
            context_id,
            HandshakeState::InitiatorAwaitingResponse {
                initiator_did: initiator_did.clone(),
                responder_did: responder_did.clone(),
                ephemeral_secret: ie_priv,
                started_at: now,
            },
        );
        drop(pending);

        let sealed = SealedPayload {
            enc: enc.as_bytes().to_vec(),
            ciphertext,
        };
        let timestamp = now.unix_timestamp();
        let body_b64 = body_b64_sealed(&sealed);
        let signature = sign_phase(&initiator_did, &responder_did, &body_b64, timestamp, initiator_keys);

        Ok(SignedPhase { payload: sealed, timestamp, signature })
    }

    /// Responder side, phase two: verify the `Request`'s signature (H1),
    /// open it, generate its own fresh ephemeral keypair (H2), derive the
    /// shared ECDH secret, mint the session id, and seal-and-sign a
    /// `ResponseInner` back to the initiator's long-term KEM key.
    /// Session-key derivation is deferred to [`Self::responder_complete`]
    /// (H4).
    pub async fn responder_handle_request(
        &self,
        context_id: Uuid,
        phase: SignedPhase<SealedPayload>,
        responder_priv: &KemPrivateKey,
        responder_keys: &SigningKeypair,
        now: OffsetDateTime,
    ) -> Result<SignedPhase<SealedPayload>, HandshakeError> {
        let mut pending = self.pending.lock().await;
        let invited = match pending.get(&context_id) {
            Some(HandshakeState::Invited { .. }) => pending.remove(&context_id).unwrap(),
            _ => return Err(HandshakeError::ProtocolViolation),
        };
        let (initiator_did, responder_did, started_at) = match invited {
            HandshakeState::Invited {
                initiator_did,
                responder_did,
                started_at,
                ..
            } => (initiator_did, responder_did, started_at),
            _ => unreachable!(),
        };
        drop(pending);
        if now > started_at + self.handshake_timeout {
            return Err(HandshakeError::TimedOut);
        }

        let SignedPhase { payload: sealed, timestamp, signature } = phase;
        let initiator_record = self.resolver.resolve(&initiator_did).await?;
        let body_b64 = body_b64_sealed(&sealed);
        verify_phase(&initiator_did, &responder_did, &body_b64, timestamp, &signature, initiator_record.sign_public_key.as_slice())?;

        let encapped = sage_crypto::HpkeEncapsulatedKey::from(sealed.enc);
        let opened = hpke_open(
            responder_priv,
            &encapped,
            INFO_REQUEST,
            context_id.as_bytes(),
            &sealed.ciphertext,
        )?;
        let inner: RequestInner = serde_json::from_slice(&opened)?;

        if inner.sender_did != initiator_did.to_string() {
            return Err(HandshakeError::ProtocolViolation);
        }

        let ie_pub = KemPublicKey::try_from(&inner.ie_pub[..])?;
        let (re_priv, re_pub) = KemPrivateKey::generate();
        let shared = re_priv.diffie_hellman(&ie_pub);
        let session_id = SessionId::generate();

        let initiator_kem_pub = KemPublicKey::try_from(&initiator_record.kem_public_key[..])?;

        let response = ResponseInner {
            re_pub: re_pub.to_bytes(),
            session_id: session_id.as_uuid(),
        };
        let plaintext = serde_json::to_vec(&response)?;
        let (enc, ciphertext) = hpke_seal(
            &initiator_kem_pub,
            INFO_RESPONSE,
            context_id.as_bytes(),
            &plaintext,
        )?;

        let mut pending = self.pending.lock().await;
        pending.insert(
            context_id,
            HandshakeState::ResponderAwaitingComplete {
                initiator_did: initiator_did.clone(),
                responder_did: responder_did.clone(),
                session_id,
                shared_secret: shared,
                started_at,
            },
        );
        drop(pending);

        let sealed = SealedPayload {
            enc: enc.as_bytes().to_vec(),
            ciphertext,
        };
        let timestamp = now.unix_timestamp();
        let body_b64 = body_b64_sealed(&sealed);
        let signature = sign_phase(&responder_did, &initiator_did, &body_b64, timestamp, responder_keys);

        Ok(SignedPhase { payload: sealed, timestamp, signature })
    }

    /// Initiator side, phase two conclusion: verify the `Response`'s
    /// signature (H1), open it, derive the shared secret and session key,
    /// and build the now-`Active` session. Returns the session alongside
    /// the signed `Complete` confirmation to send the responder.
    pub async fn initiator_complete(
        &self,
        context_id: Uuid,
        phase: SignedPhase<SealedPayload>,
        initiator_priv: &KemPrivateKey,
        initiator_keys: &SigningKeypair,
        now: OffsetDateTime,
        max_age: Duration,
    ) -> Result<(Session, SignedPhase<CompleteConfirmation>), HandshakeError> {
        let mut pending = self.pending.lock().await;
        let entry = pending.remove(&context_id).ok_or(HandshakeError::ProtocolViolation)?;
        let (initiator_did, responder_did, ephemeral_secret, started_at) = match entry {
            HandshakeState::InitiatorAwaitingResponse {
                initiator_did,
                responder_did,
                ephemeral_secret,
                started_at,
            } => (initiator_did, responder_did, ephemeral_secret, started_at),
            _ => return Err(HandshakeError::ProtocolViolation),
        };
        drop(pending);

        if now > started_at + self.handshake_timeout {
            return Err(HandshakeError::TimedOut);
        }

        let SignedPhase { payload: sealed, timestamp, signature } = phase;
        let responder_record = self.resolver.resolve(&responder_did).await?;
        let body_b64 = body_b64_sealed(&sealed);
        verify_phase(&responder_did, &initiator_did, &body_b64, timestamp, &signature, responder_record.sign_public_key.as_slice())?;

        let encapped = sage_crypto::HpkeEncapsulatedKey::from(sealed.enc);
        let opened = hpke_open(
            initiator_priv,
            &encapped,
            INFO_RESPONSE,
            context_id.as_bytes(),
            &sealed.ciphertext,
        )?;
        let response: ResponseInner = serde_json::from_slice(&opened)?;

        let re_pub = KemPublicKey::try_from(&response.re_pub[..])?;
        let shared = ephemeral_secret.diffie_hellman(&re_pub);
        let session_key = derive_session_key(&shared, context_id);

        let session_id: SessionId = response.session_id.into();
        let session = Session {
            session_id,
            context_id,
            initiator_did: initiator_did.clone(),
            responder_did: responder_did.clone(),
            session_key,
            send_counter: 0,
            recv_counter: 0,
            last_activity: now,
            created_at: now,
            expires_at: now + max_age,
            state: SessionState::Active,
            metadata: BTreeMap::new(),
        };

        let confirmation = CompleteConfirmation { session_id: session_id.as_uuid() };
        let complete_timestamp = now.unix_timestamp();
        let body_b64 = body_b64_json(&confirmation)?;
        let signature = sign_phase(&initiator_did, &responder_did, &body_b64, complete_timestamp, initiator_keys);

        Ok((
            session,
            SignedPhase {
                payload: confirmation,
                timestamp: complete_timestamp,
                signature,
            },
        ))
    }

    /// Responder side, phase three: verify the `Complete`'s signature
    /// (H1), consume the pending `ResponderAwaitingComplete` entry, and
    /// finish deriving the session key. Because this removes the pending
    /// entry outright, a second `Complete` for the same `context_id`
    /// finds nothing pending and is rejected as a protocol violation (H4)
    /// with no extra bookkeeping.
    pub async fn responder_complete(
        &self,
        context_id: Uuid,
        phase: SignedPhase<CompleteConfirmation>,
        now: OffsetDateTime,
        max_age: Duration,
    ) -> Result<Session, HandshakeError> {
        let mut pending = self.pending.lock().await;
        let entry = pending.remove(&context_id).ok_or(HandshakeError::ProtocolViolation)?;
        let (initiator_did, responder_did, session_id, shared_secret, started_at) = match entry {
            HandshakeState::ResponderAwaitingComplete {
                initiator_did,
                responder_did,
                session_id,
                shared_secret,
                started_at,
            } => (initiator_did, responder_did, session_id, shared_secret, started_at),
            _ => return Err(HandshakeError::ProtocolViolation),
        };
        drop(pending);

        let SignedPhase { payload: confirmation, timestamp, signature } = phase;
        let initiator_record = self.resolver.resolve(&initiator_did).await?;
        let body_b64 = body_b64_json(&confirmation)?;
        verify_phase(&initiator_did, &responder_did, &body_b64, timestamp, &signature, initiator_record.sign_public_key.as_slice())?;

        if session_id.as_uuid() != confirmation.session_id {
            return Err(HandshakeError::ProtocolViolation);
        }
        if now > started_at + self.handshake_timeout {
            return Err(HandshakeError::TimedOut);
        }

        let session_key = derive_session_key(&shared_secret, context_id);

        Ok(Session {
            session_id,
            context_id,
            initiator_did,
            responder_did,
            session_key,
            send_counter: 0,
            recv_counter: 0,
            last_activity: now,
            created_at: now,
            expires_at: now + max_age,
            state: SessionState::Active,
            metadata: BTreeMap::new(),
        })
    }

    /// H5: drop pending entries older than the configured handshake
    /// timeout. Returns the number purged.
    pub async fn purge_timed_out(&self, now: OffsetDateTime) -> usize {
        let mut pending = self.pending.lock().await;
        let before = pending.len();
        pending.retain(|_, state| !state.is_timed_out(now, self.handshake_timeout));
        before - pending.len()
    }

    #[cfg(test)]
    async fn pending_len(&self) -> usize {
        self.pending.lock().await.len()
    }
}

fn derive_session_key(shared: &Zeroizing<[u8; 32]>, context_id: Uuid) -> Zeroizing<[u8; 32]> {
    Zeroizing::new(hkdf_sha256(&**shared, &session_key_info(context_id)))
}
