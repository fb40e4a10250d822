//! Phase payload shapes, JSON-framed per the Open Question resolution in
//! §4.7: a deployment accepts exactly one framing rather than sniffing
//! between JSON and protobuf for the same wire position.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The plaintext `Invitation` phase message. Sent unsealed — it carries no
/// secret material, only the initiator's identity claim, which is
/// authenticated by the per-phase Ed25519 signature over the canonical
/// tuple (see [`crate::auth`]), not by HPKE. RFC 9421 doesn't apply here:
/// its `keyid` names a session, and no session exists until the handshake
/// that creates it is already authenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationPayload {
    pub sender_did: String,
    pub metadata: BTreeMap<String, String>,
}

/// The plaintext inside the `Request` phase's HPKE seal, addressed to the
/// responder's long-term KEM public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestInner {
    pub sender_did: String,
    pub ie_pub: [u8; 32],
    pub timestamp: i64,
}

/// The plaintext inside the responder's HPKE-sealed reply, addressed back
/// to the initiator's long-term KEM public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseInner {
    pub re_pub: [u8; 32],
    pub session_id: uuid::Uuid,
}

/// The plaintext `Complete` phase message. Sent unsealed, like the
/// invitation: by this point the only thing left to confirm is which
/// `context_id`'s handshake the sender considers finished, which carries
/// no secret the HPKE layer would need to protect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteConfirmation {
    pub session_id: uuid::Uuid,
}

/// An HPKE-sealed payload: the encapsulated key and ciphertext, carried
/// together on the wire as `enc‖ct` (§6.2). `enc` and `ct` are kept
/// separate here rather than concatenated so callers don't have to know
/// the encapsulated-key length to split them back apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedPayload {
    pub enc: Vec<u8>,
    pub ciphertext: Vec<u8>,
}
