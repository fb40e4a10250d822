//! The agent record produced by the (out-of-tree) DID registry.
//!
//! `AgentRecord` is read-only data as far as this workspace is concerned: it
//! is resolved through `sage-resolver::DidResolver` and never mutated here.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::did::Did;

/// An Ed25519 verification (signing) public key, 32 bytes.
pub type SignPublicKeyBytes = [u8; 32];

/// An X25519 key-encapsulation public key, 32 bytes.
pub type KemPublicKeyBytes = [u8; 32];

/// The agent record as surfaced by the DID registry through a `DidResolver`.
///
/// Reference: §3 "Agent record". Invariant: a record with `is_active=false`
/// or `revoked=true` MUST be treated as unusable for both handshake and
/// verification — see [`AgentRecord::is_usable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub did: Did,
    pub sign_public_key: SignPublicKeyBytes,
    pub kem_public_key: KemPublicKeyBytes,
    pub owner_address: String,
    pub is_active: bool,
    pub revoked: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl AgentRecord {
    /// Whether this record may be used for a handshake or a signature
    /// verification. A record that is inactive or revoked is unusable for
    /// both, regardless of which flag is set.
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.revoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample(is_active: bool, revoked: bool) -> AgentRecord {
        let now = OffsetDateTime::UNIX_EPOCH;
        AgentRecord {
            did: Did::from_str("did:sage:test:550e8400-e29b-41d4-a716-446655440000").unwrap(),
            sign_public_key: [1u8; 32],
            kem_public_key: [2u8; 32],
            owner_address: "0xowner".to_string(),
            is_active,
            revoked,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn active_unrevoked_is_usable() {
        assert!(sample(true, false).is_usable());
    }

    #[test]
    fn inactive_is_unusable() {
        assert!(!sample(false, false).is_usable());
    }

    #[test]
    fn revoked_is_unusable_even_if_active() {
        assert!(!sample(true, true).is_usable());
    }
}
