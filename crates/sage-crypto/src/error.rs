//! Errors produced by this crate.
//!
//! These never appear on the wire directly; component crates convert them
//! into the relevant `sage_types::error` variant (signature failures into
//! `AuthenticationError`, handshake HPKE failures into `HandshakeErrorKind`)
//! so callers above the crypto layer only see the shared taxonomy.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("key has the wrong length: expected {expected}, got {got}")]
    WrongKeyLength { expected: usize, got: usize },

    #[error("ed25519 signature is malformed")]
    MalformedSignature,

    #[error("ed25519 verification failed")]
    InvalidSignature,

    #[error("hpke setup or seal/open failed")]
    HpkeFailure,

    #[error("session-key aead seal/open failed")]
    AeadFailure,

    #[error("hex decoding failed")]
    InvalidHex,
}
