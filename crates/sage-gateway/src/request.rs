//! Transport-agnostic request/response shapes for the protected channel.
//!
//! Mirrors [`sage_types::envelope::PacketEnvelope`]'s own stance: this
//! crate never touches a socket or HTTP library. An embedder builds an
//! [`InboundRequest`] from whatever concrete request type it owns (axum
//! extractors, a raw hyper request, a WebSocket frame) and turns an
//! [`OutboundResponse`] back into its own reply type.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use sage_crypto::sha256;
use sage_types::envelope::PacketEnvelope;

/// One inbound protected-channel packet, as addressed by §6.1's header
/// set: the signature envelope (covers method/authority/path/digest),
/// the sender's claimed DID, and the opaque ciphertext body.
///
/// `envelope.created_ts` doubles as the packet's application timestamp
/// (§4.9 step 4) — the wire format carries exactly one timestamp, the
/// `created` signature parameter, and nothing in §6.1 suggests a second.
/// Likewise `envelope.nonce` is the single RFC 9421 nonce; per-packet
/// ordering/dedup state (§4.9 step 4's "sequence") is not carried on the
/// wire at all — it lives in `Session.recv_counter`, which this crate
/// already holds once it has looked the session up in step 3, so nothing
/// further needs to travel in the request headers.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub envelope: PacketEnvelope,
    pub sender_did: String,
    /// Opaque ciphertext from the request body.
    pub body: Vec<u8>,
}

impl InboundRequest {
    /// Recomputes `sha-256=:<digest>:` over the actual wire body and
    /// compares it against `envelope.content_digest`. `verify_envelope`
    /// only checks that the signature covers whatever digest *string* the
    /// envelope carries — it never sees the body — so a packet whose body
    /// is swapped out after signing, with the header left untouched,
    /// would otherwise sail through signature verification. This is the
    /// "digest mismatch caught during base reconstruction" check.
    pub fn content_digest_matches(&self) -> bool {
        let expected = format!("sha-256=:{}:", BASE64.encode(sha256(&self.body)));
        expected == self.envelope.content_digest
    }
}

/// The reply to an [`InboundRequest`]: opaque ciphertext the embedder
/// base64-encodes into the `{"cipher_b64": "..."}` response body (§6.1).
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub body: Vec<u8>,
}
