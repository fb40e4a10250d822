//! Ed25519 signing, used both for the RFC 9421 message-signature algorithm
//! (§4.3) and for the per-agent `sign_public_key` published in a DID
//! document (§3).

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey as DalekVerifyingKey};
use rand_core::OsRng;

use crate::error::CryptoError;

pub const ED25519_PUBLIC_KEY_LEN: usize = 32;
/// Per §4.1 an Ed25519 private key is 64B — the 32-byte seed concatenated
/// with its derived 32-byte public key. `ed25519_dalek::SigningKey` stores
/// and exchanges only the 32-byte seed (it re-derives the public half on
/// demand), so that is what this crate persists and accepts as "the"
/// private key; `to_bytes`/`from_bytes` operate on the seed, not the full
/// 64-byte expanded form.
pub const ED25519_SEED_LEN: usize = 32;
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// A holder's Ed25519 keypair. Never serialized; the embedder is
/// responsible for key custody.
pub struct SigningKeypair(SigningKey);

impl SigningKeypair {
    /// Generates a fresh keypair from the OS CSPRNG.
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    /// Reconstructs a keypair from a 32-byte seed.
    pub fn from_bytes(seed: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; ED25519_SEED_LEN] =
            seed.try_into().map_err(|_| CryptoError::WrongKeyLength {
                expected: ED25519_SEED_LEN,
                got: seed.len(),
            })?;
        Ok(Self(SigningKey::from_bytes(&seed)))
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }

    pub fn to_bytes(&self) -> [u8; ED25519_SEED_LEN] {
        self.0.to_bytes()
    }

    /// `ed25519_sign(priv, msg) -> sig(64B)`, per §4.1.
    pub fn sign(&self, message: &[u8]) -> [u8; ED25519_SIGNATURE_LEN] {
        self.0.sign(message).to_bytes()
    }
}

/// An Ed25519 public key, as published in an `AgentRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyingKey(DalekVerifyingKey);

impl VerifyingKey {
    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LEN] {
        self.0.to_bytes()
    }

    /// `ed25519_verify(pub, msg, sig) -> ok`, per §4.1.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let sig_bytes: [u8; ED25519_SIGNATURE_LEN] = signature
            .try_into()
            .map_err(|_| CryptoError::MalformedSignature)?;
        let signature = Signature::from_bytes(&sig_bytes);
        self.0
            .verify(message, &signature)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; ED25519_PUBLIC_KEY_LEN] =
            bytes.try_into().map_err(|_| CryptoError::WrongKeyLength {
                expected: ED25519_PUBLIC_KEY_LEN,
                got: bytes.len(),
            })?;
        let key = DalekVerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self(key))
    }
}
