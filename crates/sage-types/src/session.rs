//! The session entity: the central data structure of the security engine.
//!
//! A `Session` is created once by the handshake engine (`sage-handshake`) on
//! a successful three-phase exchange, is thereafter mutated only through
//! `sage-session::SessionManager` (`touch`, `close`, `expire`), and is
//! destroyed either by periodic cleanup or an explicit close.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::did::Did;

/// Opaque, globally unique session identifier. Surfaced as the RFC 9421
/// `keyid` on every protected-channel request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a new random (UUID v4) session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lowercase, hyphenated, 36 chars — RFC 9421 keyid format (§6.4).
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Which key a `KeyType` names: the Ed25519 signing key or the X25519 KEM
/// key. Reference §9 "Sum types ... `KeyType` are naturally tagged
/// variants".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    Signing,
    Kem,
}

/// Lifecycle state of a session. Reference §3: once `Expired` or `Revoked`,
/// a session is never returned to `Active` (invariant I3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    HandshakeInvited,
    HandshakeRequested,
    Active,
    Expired,
    Revoked,
}

impl SessionState {
    /// Whether a session in this state may still transition to `Active`.
    /// `Expired` and `Revoked` are terminal (invariant I3).
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Expired | SessionState::Revoked)
    }
}

/// The central session entity. See §3 for the full field-by-field
/// invariants (I1–I4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    /// Handshake correlation identifier, stable across all three phases.
    pub context_id: Uuid,
    pub initiator_did: Did,
    pub responder_did: Did,
    /// Symmetric keying material derived from the HPKE exchange. Wrapped in
    /// `Zeroizing` so it is wiped from memory on drop, satisfying "must be
    /// zeroized on deletion" without the store having to remember to do so
    /// explicitly.
    #[serde(with = "session_key_serde")]
    pub session_key: Zeroizing<[u8; 32]>,
    pub send_counter: u64,
    pub recv_counter: u64,
    pub last_activity: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub state: SessionState,
    pub metadata: BTreeMap<String, String>,
}

impl Session {
    /// Whether `now` places this session past either expiry boundary
    /// (invariant I2): absolute max-age (`expires_at`) or idle timeout
    /// (`last_activity + idle_timeout`).
    pub fn is_expired(&self, now: OffsetDateTime, idle_timeout: time::Duration) -> bool {
        now > self.expires_at || now > self.last_activity + idle_timeout
    }

    /// Record a freshly validated inbound packet: bump `recv_counter` and
    /// `last_activity`. Callers are responsible for having already checked
    /// monotonicity via `sage-validator` — this method trusts its input.
    pub fn record_inbound(&mut self, now: OffsetDateTime) {
        self.recv_counter += 1;
        self.last_activity = now;
    }

    /// Record an outbound packet: bump `send_counter` only. Sending does not
    /// by itself refresh idle expiry — only successfully validated inbound
    /// traffic does, per §4.8's "on every successful validated packet".
    pub fn record_outbound(&mut self) {
        self.send_counter += 1;
    }
}

mod session_key_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use zeroize::Zeroizing;

    pub fn serialize<S: Serializer>(
        key: &Zeroizing<[u8; 32]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let bytes: &[u8; 32] = key;
        bytes.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Zeroizing<[u8; 32]>, D::Error> {
        let bytes = <[u8; 32]>::deserialize(deserializer)?;
        Ok(Zeroizing::new(bytes))
    }
}
