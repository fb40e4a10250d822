//! Per-phase Ed25519 authentication (H1, §4.7).
//!
//! Every phase travels signed over the unprotected, pre-session channel —
//! there is no RFC 9421 `keyid` yet, because that names a session that
//! doesn't exist until the handshake finishes. Authentication instead
//! relies on a signature over the canonical tuple `(sender_did,
//! receiver_did, body_b64, timestamp)` using the sender's registered
//! signing key, where `body_b64` is the base64 encoding of whatever the
//! wire envelope's `message` field would carry for that phase: the
//! phase's JSON payload for `Invitation`/`Complete`, or `enc‖ciphertext`
//! for the HPKE-sealed `Request`/`Response` legs.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Serialize;

use sage_crypto::signing::{SigningKeypair, VerifyingKey};
use sage_types::did::Did;

use crate::error::HandshakeError;
use crate::payload::SealedPayload;

/// A phase payload paired with the signature and timestamp that
/// authenticate it — the three fields a wire envelope would carry
/// alongside `sender_did`/`receiver_did`/`context_id`/`phase`, which are
/// already explicit arguments on every [`crate::engine::HandshakeEngine`]
/// method and so aren't duplicated here.
#[derive(Debug, Clone)]
pub struct SignedPhase<T> {
    pub payload: T,
    pub timestamp: i64,
    pub signature: Vec<u8>,
}

fn canonical_bytes(sender_did: &Did, receiver_did: &Did, body_b64: &str, timestamp: i64) -> Vec<u8> {
    format!("{sender_did}\n{receiver_did}\n{body_b64}\n{timestamp}").into_bytes()
}

/// base64 of a JSON-framed phase payload (`Invitation`/`Complete`).
pub fn body_b64_json<T: Serialize>(payload: &T) -> Result<String, HandshakeError> {
    Ok(BASE64.encode(serde_json::to_vec(payload)?))
}

/// base64 of `enc‖ciphertext` for an HPKE-sealed phase (`Request`/`Response`).
pub fn body_b64_sealed(sealed: &SealedPayload) -> String {
    let mut joined = Vec::with_capacity(sealed.enc.len() + sealed.ciphertext.len());
    joined.extend_from_slice(&sealed.enc);
    joined.extend_from_slice(&sealed.ciphertext);
    BASE64.encode(joined)
}

/// Signs a phase's canonical tuple with the sender's long-term signing key.
pub fn sign_phase(sender_did: &Did, receiver_did: &Did, body_b64: &str, timestamp: i64, signing_key: &SigningKeypair) -> Vec<u8> {
    signing_key.sign(&canonical_bytes(sender_did, receiver_did, body_b64, timestamp)).to_vec()
}

/// Verifies a phase's signature against the sender's resolved
/// `sign_public_key`. Any failure — malformed key, malformed signature,
/// or a genuine mismatch — is [`HandshakeError::AuthFailed`] (H1); this
/// crate never distinguishes the reason to a caller that isn't the
/// sender itself.
pub fn verify_phase(
    sender_did: &Did,
    receiver_did: &Did,
    body_b64: &str,
    timestamp: i64,
    signature: &[u8],
    sign_public_key: &[u8],
) -> Result<(), HandshakeError> {
    let verifying_key = VerifyingKey::try_from(sign_public_key).map_err(|_| HandshakeError::AuthFailed)?;
    verifying_key
        .verify(&canonical_bytes(sender_did, receiver_did, body_b64, timestamp), signature)
        .map_err(|_| HandshakeError::AuthFailed)
}
