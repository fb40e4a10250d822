//! # RFC 9421 HTTP Message Signatures (C6)
//!
//! Canonical signature-base construction, the `Signature-Input`/`Signature`
//! header pair, and the verification pipeline that gates every
//! protected-channel packet (§4.6).

mod base;
mod error;
mod input;
mod verify;

pub use base::build_signature_base;
pub use error::SignatureError;
pub use input::{Signature, SignatureInput, ALG_ED25519};
pub use verify::{sign_envelope, verify_envelope};

/// The covered components every signature in this protocol signs over, in
/// order, per §4.6. Fixed rather than negotiated — this is a closed
/// two-party protocol, not a general HTTP signature agent.
pub const COVERED_COMPONENTS: [&str; 5] = ["@method", "@authority", "@path", "content-digest", "date"];
