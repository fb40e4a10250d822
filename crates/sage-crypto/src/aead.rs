//! Per-packet body encryption under an established session's symmetric
//! `session_key` (§4.9 steps 5 and 7). Distinct from [`crate::pke`]: the
//! handshake's HPKE exchange transports the *key*, but once a session is
//! `Active` every packet body is sealed directly with ChaCha20-Poly1305
//! under that key rather than re-running HPKE per packet.
//!
//! The AEAD nonce is derived rather than carried separately on the wire:
//! `SHA-256(session_id ‖ sequence)[..12]`. Since `sequence` is strictly
//! monotonic per session (enforced by `sage-validator`'s order check
//! before a packet ever reaches this layer) and `session_id` is fixed for
//! the session's lifetime, no two packets in the same direction ever
//! reuse a nonce.

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

use crate::error::CryptoError;
use crate::hash::sha256;

fn derive_nonce(session_id: &[u8], sequence: u64) -> Nonce {
    let mut input = Vec::with_capacity(session_id.len() + 8);
    input.extend_from_slice(session_id);
    input.extend_from_slice(&sequence.to_be_bytes());
    let digest = sha256(&input);
    *Nonce::from_slice(&digest[..12])
}

/// Seals `plaintext` under `session_key`, using `sequence` to derive a
/// fresh nonce.
pub fn seal_with_session_key(
    session_key: &[u8; 32],
    session_id: &[u8],
    sequence: u64,
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(session_key));
    let nonce = derive_nonce(session_id, sequence);
    cipher
        .encrypt(&nonce, chacha20poly1305::aead::Payload { msg: plaintext, aad })
        .map_err(|_| CryptoError::AeadFailure)
}

/// Opens a body sealed by [`seal_with_session_key`].
pub fn open_with_session_key(
    session_key: &[u8; 32],
    session_id: &[u8],
    sequence: u64,
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(session_key));
    let nonce = derive_nonce(session_id, sequence);
    cipher
        .decrypt(&nonce, chacha20poly1305::aead::Payload { msg: ciphertext, aad })
        .map_err(|_| CryptoError::AeadFailure)
}
