//! X25519 key agreement.
//!
//! Used twice per handshake: once as the long-term KEM keypair an agent
//! publishes in its `AgentRecord` (the HPKE recipient key, see [`pke`]),
//! and once as the ephemeral ECDH keypair each side generates fresh for
//! every handshake attempt to derive the session key (§4.7).

use rand_core::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::error::CryptoError;

pub const X25519_KEY_LEN: usize = 32;

/// An X25519 private scalar. Wraps `StaticSecret` rather than
/// `EphemeralSecret` so a handshake's ephemeral key can still be
/// constructed from stored bytes in tests without fighting the type
/// system; callers are responsible for using each keypair for a single
/// ECDH exchange during a handshake attempt.
pub struct KemPrivateKey(StaticSecret);

/// An X25519 public key, carried in an `AgentRecord.kem_public_key` or in
/// a handshake phase payload's ephemeral public key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemPublicKey(PublicKey);

impl KemPrivateKey {
    /// `x25519_keygen() -> (priv, pub)`, per §4.1.
    pub fn generate() -> (Self, KemPublicKey) {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = KemPublicKey(PublicKey::from(&secret));
        (Self(secret), public)
    }

    pub fn public_key(&self) -> KemPublicKey {
        KemPublicKey(PublicKey::from(&self.0))
    }

    pub fn to_bytes(&self) -> [u8; X25519_KEY_LEN] {
        self.0.to_bytes()
    }

    /// Computes the raw ECDH shared secret with `their_public`. The result
    /// is wrapped in `Zeroizing` so callers that feed it straight into an
    /// HKDF never leave it lingering in memory afterwards.
    pub fn diffie_hellman(&self, their_public: &KemPublicKey) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.0.diffie_hellman(&their_public.0).to_bytes())
    }
}

impl KemPublicKey {
    pub fn to_bytes(&self) -> [u8; X25519_KEY_LEN] {
        self.0.to_bytes()
    }

    pub(crate) fn inner(&self) -> &PublicKey {
        &self.0
    }
}

impl TryFrom<&[u8]> for KemPrivateKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; X25519_KEY_LEN] = bytes.try_into().map_err(|_| CryptoError::WrongKeyLength {
            expected: X25519_KEY_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(StaticSecret::from(bytes)))
    }
}

impl TryFrom<&[u8]> for KemPublicKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; X25519_KEY_LEN] = bytes.try_into().map_err(|_| CryptoError::WrongKeyLength {
            expected: X25519_KEY_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(PublicKey::from(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sides_derive_the_same_shared_secret() {
        let (initiator_priv, initiator_pub) = KemPrivateKey::generate();
        let (responder_priv, responder_pub) = KemPrivateKey::generate();

        let a = initiator_priv.diffie_hellman(&responder_pub);
        let b = responder_priv.diffie_hellman(&initiator_pub);
        assert_eq!(*a, *b);
    }

    #[test]
    fn rejects_wrong_length_public_key() {
        let err = KemPublicKey::try_from(&[0u8; 31][..]).unwrap_err();
        assert_eq!(
            err,
            CryptoError::WrongKeyLength {
                expected: X25519_KEY_LEN,
                got: 31
            }
        );
    }

    #[test]
    fn public_key_round_trips_through_bytes() {
        let (_, public) = KemPrivateKey::generate();
        let bytes = public.to_bytes();
        let restored = KemPublicKey::try_from(&bytes[..]).unwrap();
        assert_eq!(restored, public);
    }
}
