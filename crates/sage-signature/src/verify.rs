//! Signing and the §4.6 verification pipeline.
//!
//! Resolving `keyid` to a signer's Ed25519 public key is the caller's job
//! (`sage-gateway` owns the session lookup and DID resolution); this crate
//! only needs the resolved [`sage_crypto::VerifyingKey`] to check the
//! signature itself, which keeps it decoupled from session/DID storage.

use sage_crypto::signing::{SigningKeypair, VerifyingKey};
use sage_stores::NonceStore;
use sage_types::envelope::PacketEnvelope;
#[cfg(test)]
use sage_types::envelope::format_http_date;
use time::{Duration, OffsetDateTime};
use tracing::{instrument, warn};

use crate::base::build_signature_base;
use crate::error::SignatureError;
use crate::input::{Signature, SignatureInput};

/// Signs `envelope` with `signing_key`, producing the `Signature` value to
/// attach alongside the `SignatureInput` that was used.
pub fn sign_envelope(envelope: &PacketEnvelope, input: &SignatureInput, signing_key: &SigningKeypair) -> Signature {
    let base = build_signature_base(envelope, input);
    Signature(signing_key.sign(&base))
}

/// Runs the full §4.6 verification pipeline against an inbound envelope,
/// in order: malformed headers, staleness, then replay, then the Ed25519
/// check itself. `signer_key` is the already-resolved public key for the
/// DID named by this packet's session (see module docs).
#[instrument(skip_all, fields(session_id = %envelope.key_id))]
pub async fn verify_envelope<N: NonceStore>(
    envelope: &PacketEnvelope,
    signer_key: &VerifyingKey,
    nonce_store: &N,
    now: OffsetDateTime,
    max_clock_skew: Duration,
    nonce_ttl: Duration,
) -> Result<(), SignatureError> {
    let input = SignatureInput {
        created: envelope.created_ts,
        keyid: envelope.key_id.clone(),
        nonce: envelope.nonce.clone(),
    };

    let signature: Signature = envelope.signature.parse().map_err(|_| SignatureError::MalformedSignature)?;

    let created = OffsetDateTime::from_unix_timestamp(input.created).map_err(|_| SignatureError::MalformedSignature)?;
    let drift = if created > now { created - now } else { now - created };
    if drift > max_clock_skew {
        warn!(drift_secs = drift.whole_seconds(), "rejecting stale signature");
        return Err(SignatureError::StaleSignature);
    }

    if !nonce_store.check_and_store(&envelope.nonce, nonce_ttl).await {
        warn!(nonce = %envelope.nonce, "rejecting replayed nonce");
        return Err(SignatureError::ReplayedSignature);
    }

    let base = build_signature_base(envelope, &input);
    signer_key.verify(&base, &signature.0).map_err(|_| {
        warn!("rejecting invalid ed25519 signature");
        SignatureError::InvalidSignature
    })
}
