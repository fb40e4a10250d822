//! The structured audit event every rejection path records (§7).

use time::OffsetDateTime;

use sage_types::did::Did;
use sage_types::error::ErrorCode;

/// One recorded rejection: who, when, why, and which packet.
///
/// `peer_did` is `None` when rejection happens before a sender's DID can
/// be established at all (e.g. a malformed `Signature-Input` header).
/// `packet_id` is whatever identifier the caller had on hand at the
/// point of rejection — a nonce, a `Content-Digest`, or a handshake
/// `context_id` — not a field with one canonical source across every
/// rejection path.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub timestamp: OffsetDateTime,
    pub peer_did: Option<Did>,
    pub error_code: ErrorCode,
    pub packet_id: String,
}

impl AuditEvent {
    pub fn new(timestamp: OffsetDateTime, peer_did: Option<Did>, error_code: ErrorCode, packet_id: impl Into<String>) -> Self {
        Self {
            timestamp,
            peer_did,
            error_code,
            packet_id: packet_id.into(),
        }
    }
}
