//! Reference §4.6: the five rejection reasons, each mapping 1:1 to a wire
//! error code in §6.6.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("Signature or Signature-Input header missing or malformed")]
    MalformedSignature,

    #[error("signature created outside the accepted clock skew")]
    StaleSignature,

    #[error("keyid does not name a known session or resolvable agent key")]
    UnknownKey,

    #[error("nonce has already been observed")]
    ReplayedSignature,

    #[error("ed25519 verification failed")]
    InvalidSignature,
}
