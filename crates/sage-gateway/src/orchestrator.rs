//! The protected-channel orchestrator (§4.9): the single pipeline every
//! inbound packet runs through, in order, aborting at the first failing
//! step before any application logic runs.
//!
//! ## Resolving the `(sequence, nonce, timestamp)` packet header
//!
//! §4.9 step 4 calls for a "packet header" carrying `sequence`, `nonce`,
//! and `timestamp` ahead of decryption. §6.1's wire format does not add
//! any header beyond the RFC 9421 signature fields and `Content-Digest`,
//! so each of those three is satisfied by a field already on the wire
//! rather than a new one:
//!
//! * `timestamp` is `envelope.created_ts`, the signature's `created`
//!   parameter — the wire format carries exactly one packet timestamp.
//! * `sequence` never travels on the wire at all. It is `Session`'s own
//!   `recv_counter`/`send_counter` (I4), already in hand once step 3
//!   loads the session, and used only to derive the per-packet AEAD
//!   nonce for body encryption (`sage_crypto::{seal,open}_with_session_key`).
//! * `nonce` for the order/duplicate check handed to C5 is deliberately
//!   *not* `envelope.nonce` again — that value was just consumed by C6's
//!   own replay check in step 2 against the same shared `NonceStore`
//!   (`sage_stores::NonceStore`'s doc comment: the RFC 9421 nonce and the
//!   packet nonce "share one table"), so re-checking the identical string
//!   a few lines later would always fail as "already seen". Step 4 instead
//!   derives its own order/dedup keys from `envelope.content_digest`,
//!   which is unique per distinct body and still backed by that same
//!   store/registry — a second, independent replay check keyed on the
//!   packet's content rather than its opaque nonce token, not a repeat of
//!   the first.
//!
//! Step 2 also recomputes `Content-Digest` over the body actually on the
//! wire and compares it to the envelope's signed copy (see
//! [`crate::request::InboundRequest::content_digest_matches`]) — `C6`'s
//! signature check alone only proves the envelope *headers* are authentic,
//! not that the attached body is the one that was signed over.
//!
//! Every failure in steps 1-5 is recorded through `sage_audit::AuditSink`
//! before it is returned, matching the wire nonce as `packet_id` and
//! whatever DID had been established by that point (`None` if rejection
//! happens before a sender identity could be resolved at all). Steps 6-8
//! run only once a packet is fully admitted, so their errors are
//! application/internal failures rather than the security-boundary
//! rejections §7 asks every path to report.

use std::str::FromStr;
use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{instrument, warn};

use sage_audit::{AuditEvent, AuditSink};
use sage_crypto::signing::VerifyingKey;
use sage_crypto::{open_with_session_key, seal_with_session_key};
use sage_resolver::DidResolver;
use sage_session::SessionManager;
use sage_signature::verify_envelope;
use sage_stores::{NonceStore, SessionStore};
use sage_types::did::Did;
use sage_types::error::{AuthenticationError, CoreError};
use sage_types::session::SessionId;

use crate::admission::AdmissionControl;
use crate::error::{from_resolve_error, from_session_error, from_signature_error, from_validation_failure};
use crate::handler::MessageHandler;
use crate::request::{InboundRequest, OutboundResponse};
use crate::validators::ValidatorRegistry;

pub struct GatewayConfig {
    pub max_clock_skew: time::Duration,
    pub nonce_ttl: time::Duration,
}

/// The assembled protected-channel pipeline (C9), generic over every
/// driven port it needs: DID resolution, nonce replay, session storage,
/// and application dispatch.
pub struct Gateway<R, N, S, H>
where
    R: DidResolver,
    N: NonceStore + Clone,
    S: SessionStore,
    H: MessageHandler,
{
    resolver: R,
    nonce_store: N,
    sessions: Arc<SessionManager<S>>,
    validators: ValidatorRegistry<N>,
    handler: H,
    admission: AdmissionControl,
    audit: Arc<dyn AuditSink>,
    config: GatewayConfig,
}

impl<R, N, S, H> Gateway<R, N, S, H>
where
    R: DidResolver,
    N: NonceStore + Clone,
    S: SessionStore,
    H: MessageHandler,
{
    pub fn new(
        resolver: R,
        nonce_store: N,
        sessions: Arc<SessionManager<S>>,
        validator_config: sage_validator::ValidatorConfig,
        handler: H,
        max_concurrent_packets: usize,
        audit: Arc<dyn AuditSink>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            validators: ValidatorRegistry::new(nonce_store.clone(), validator_config),
            resolver,
            nonce_store,
            sessions,
            handler,
            admission: AdmissionControl::new(max_concurrent_packets),
            audit,
            config,
        }
    }

    /// Records a rejection through the configured [`AuditSink`] (§7). Best
    /// effort: an audit sink failure never changes the outcome of the
    /// packet it is reporting on.
    async fn record_rejection(&self, now: OffsetDateTime, peer_did: Option<&Did>, err: &CoreError, packet_id: &str) {
        self.audit
            .record(AuditEvent::new(now, peer_did.cloned(), err.code(), packet_id.to_string()))
            .await;
    }

    /// Runs the full §4.9 pipeline against one inbound packet.
    #[instrument(skip_all)]
    pub async fn process(&self, request: InboundRequest, now: OffsetDateTime) -> Result<OutboundResponse, CoreError> {
        let packet_id = request.envelope.nonce.clone();

        let _permit = match self.admission.try_admit() {
            Ok(permit) => permit,
            Err(err) => {
                self.record_rejection(now, None, &err, &packet_id).await;
                return Err(err);
            }
        };

        // Step 1: keyid -> session_id.
        let session_id = match SessionId::from_str(&request.envelope.key_id) {
            Ok(id) => id,
            Err(_) => {
                let err = CoreError::Authentication(AuthenticationError::UnknownKey);
                self.record_rejection(now, None, &err, &packet_id).await;
                return Err(err);
            }
        };

        // Step 2: resolve the sender's signing key and verify signature + nonce.
        let sender_did = match Did::parse(request.sender_did.clone()) {
            Ok(did) => did,
            Err(_) => {
                let err = CoreError::Authentication(AuthenticationError::UnknownDid);
                self.record_rejection(now, None, &err, &packet_id).await;
                return Err(err);
            }
        };
        let sender_record = match self.resolver.resolve(&sender_did).await {
            Ok(record) => record,
            Err(resolve_err) => {
                let err = from_resolve_error(resolve_err);
                self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
                return Err(err);
            }
        };
        let verifying_key = match VerifyingKey::try_from(sender_record.sign_public_key.as_slice()) {
            Ok(key) => key,
            Err(_) => {
                let err = CoreError::Internal;
                self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
                return Err(err);
            }
        };
        if let Err(sig_err) = verify_envelope(
            &request.envelope,
            &verifying_key,
            &self.nonce_store,
            now,
            self.config.max_clock_skew,
            self.config.nonce_ttl,
        )
        .await
        {
            let err = from_signature_error(sig_err);
            self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
            return Err(err);
        }
        if !request.content_digest_matches() {
            let err = CoreError::Authentication(AuthenticationError::InvalidSignature);
            self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
            return Err(err);
        }

        // Step 3: session lookup.
        let mut session = match self.sessions.get(&session_id, now).await {
            Ok(session) => session,
            Err(session_err) => {
                let err = from_session_error(session_err);
                self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
                return Err(err);
            }
        };
        if session.initiator_did != sender_did && session.responder_did != sender_did {
            warn!(%sender_did, %session_id, "sender did does not belong to session");
            let err = CoreError::Authentication(AuthenticationError::UnknownDid);
            self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
            return Err(err);
        }

        // Step 4: packet header + C5 validation. See module docs for why
        // `nonce`/`message_id` here are derived from `content_digest`
        // rather than reusing `envelope.nonce`.
        let packet_ts = match OffsetDateTime::from_unix_timestamp(request.envelope.created_ts) {
            Ok(ts) => ts,
            Err(_) => {
                let err = CoreError::Internal;
                self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
                return Err(err);
            }
        };
        let order_token = format!("order:{}:{}", session_id, request.envelope.content_digest);
        let message_id = format!("msg:{}:{}", session_id, request.envelope.content_digest);
        let validation = self
            .validators
            .validate(session_id, now, packet_ts, &order_token, &message_id)
            .await;
        if let Some(failure) = validation.error() {
            let err = from_validation_failure(failure);
            self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
            return Err(err);
        }

        // Step 5: decrypt body under the session key.
        let aad = sender_did.as_str().as_bytes();
        let plaintext = match open_with_session_key(
            &session.session_key,
            session_id.as_uuid().as_bytes(),
            session.recv_counter,
            aad,
            &request.body,
        ) {
            Ok(plaintext) => plaintext,
            Err(_) => {
                let err = CoreError::Authentication(AuthenticationError::InvalidSignature);
                self.record_rejection(now, Some(&sender_did), &err, &packet_id).await;
                return Err(err);
            }
        };

        // Step 6: dispatch to application.
        let reply_plaintext = self.handler.handle(&session, plaintext).await?;

        // Step 7: encrypt the reply under the same session key.
        session.record_inbound(now);
        let send_sequence = session.send_counter;
        session.record_outbound();
        let ciphertext = seal_with_session_key(
            &session.session_key,
            session_id.as_uuid().as_bytes(),
            send_sequence,
            aad,
            &reply_plaintext,
        )
        .map_err(|_| CoreError::Internal)?;

        // Step 8: persist the bumped counters/activity.
        self.sessions.update(session).await.map_err(from_session_error)?;

        Ok(OutboundResponse { body: ciphertext })
    }

    /// Drops a session's order-tracking state, e.g. once it's closed.
    pub fn forget_session(&self, session_id: &SessionId) {
        self.validators.forget(session_id);
    }
}
