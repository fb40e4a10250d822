//! Pending handshake bookkeeping, keyed by `context_id` in
//! [`crate::engine::HandshakeEngine`]'s `pending` map.
//!
//! The three variants mirror the three phases of §4.7: a responder parks an
//! `Invited` entry on phase one, both sides hand off to a phase-two variant
//! while the synchronous Request round trip is in flight, and the Complete
//! phase consumes whichever phase-two variant is present. There is no
//! `Completed` variant — `responder_complete` removes the pending entry
//! entirely, so a duplicate Complete for the same `context_id` simply finds
//! nothing pending and is rejected as a protocol violation (H4) without any
//! extra bookkeeping.

use std::collections::BTreeMap;

use time::{Duration, OffsetDateTime};
use zeroize::Zeroizing;

use sage_crypto::kem::KemPrivateKey;
use sage_types::did::Did;
use sage_types::session::SessionId;

/// State for one in-flight handshake, keyed by `context_id`.
pub enum HandshakeState {
    /// Phase one landed: the responder has seen an `Invitation` and is
    /// waiting for the matching `Request`.
    Invited {
        initiator_did: Did,
        responder_did: Did,
        metadata: BTreeMap<String, String>,
        started_at: OffsetDateTime,
    },

    /// The initiator sent its `Request` and is holding the ephemeral
    /// private key until the synchronous response arrives.
    InitiatorAwaitingResponse {
        initiator_did: Did,
        responder_did: Did,
        ephemeral_secret: KemPrivateKey,
        started_at: OffsetDateTime,
    },

    /// The responder answered a `Request`. It already holds the ECDH
    /// shared secret, but session-key derivation and the `Active`
    /// promotion are deferred until the explicit `Complete` arrives, so
    /// the three-phase protocol is enforced even though the crypto
    /// material was ready a round trip earlier.
    ResponderAwaitingComplete {
        initiator_did: Did,
        responder_did: Did,
        session_id: SessionId,
        shared_secret: Zeroizing<[u8; 32]>,
        started_at: OffsetDateTime,
    },
}

impl HandshakeState {
    pub fn started_at(&self) -> OffsetDateTime {
        match self {
            HandshakeState::Invited { started_at, .. } => *started_at,
            HandshakeState::InitiatorAwaitingResponse { started_at, .. } => *started_at,
            HandshakeState::ResponderAwaitingComplete { started_at, .. } => *started_at,
        }
    }

    /// H5: whether this entry has outlived the handshake timeout as of
    /// `now`.
    pub fn is_timed_out(&self, now: OffsetDateTime, handshake_timeout: Duration) -> bool {
        now > self.started_at() + handshake_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn did(id: &str) -> Did {
        Did::from_str(&format!("did:sage:test:{id}")).unwrap()
    }

    #[test]
    fn not_timed_out_within_window() {
        let state = HandshakeState::Invited {
            initiator_did: did("550e8400-e29b-41d4-a716-446655440001"),
            responder_did: did("550e8400-e29b-41d4-a716-446655440002"),
            metadata: BTreeMap::new(),
            started_at: OffsetDateTime::UNIX_EPOCH,
        };
        let now = OffsetDateTime::UNIX_EPOCH + Duration::seconds(10);
        assert!(!state.is_timed_out(now, Duration::seconds(30)));
    }

    #[test]
    fn timed_out_past_window() {
        let state = HandshakeState::Invited {
            initiator_did: did("550e8400-e29b-41d4-a716-446655440001"),
            responder_did: did("550e8400-e29b-41d4-a716-446655440002"),
            metadata: BTreeMap::new(),
            started_at: OffsetDateTime::UNIX_EPOCH,
        };
        let now = OffsetDateTime::UNIX_EPOCH + Duration::seconds(31);
        assert!(state.is_timed_out(now, Duration::seconds(30)));
    }
}
