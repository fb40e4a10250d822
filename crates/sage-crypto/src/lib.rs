//! # SAGE Cryptographic Primitives (C1)
//!
//! Ed25519 sign/verify, X25519 key agreement, single-shot HPKE seal/open,
//! SHA-256 digests, and UUID v4 generation.
//!
//! ## HPKE suite pin
//!
//! Per §4.1, a deployment MUST pin exactly one RFC 9180 suite and reject any
//! other. This crate pins `DHKEM(X25519, HKDF-SHA256)` + `HKDF-SHA256` +
//! `ChaCha20Poly1305` — chosen over the allowed AES-128-GCM alternative
//! because the rest of this workspace already depends on
//! `chacha20poly1305` for symmetric sealing, so pinning to it avoids a
//! second AEAD implementation in the dependency graph.

pub mod aead;
pub mod error;
pub mod hash;
pub mod ids;
pub mod kdf;
pub mod kem;
pub mod pke;
pub mod signing;

pub use aead::{open_with_session_key, seal_with_session_key};
pub use error::CryptoError;
pub use hash::sha256;
pub use ids::new_session_uuid;
pub use kdf::hkdf_sha256;
pub use kem::{KemPrivateKey, KemPublicKey};
pub use pke::{hpke_open, hpke_seal, HpkeEncapsulatedKey};
pub use signing::{SigningKeypair, VerifyingKey, ED25519_PUBLIC_KEY_LEN, ED25519_SEED_LEN, ED25519_SIGNATURE_LEN};
