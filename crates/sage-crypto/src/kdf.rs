//! HKDF-SHA256, used to derive the handshake session key from the raw
//! X25519 ECDH shared secret (§4.7): `HKDF(shared, label ‖ context_id,
//! output=32B)`.

use hkdf::Hkdf;
use sha2::Sha256;

/// Derives 32 bytes of keying material from `ikm` using `info` as the
/// HKDF "info" parameter, with no separate salt (the shared secret itself
/// already has full entropy, so an all-zero salt per RFC 5869 is
/// sufficient here).
pub fn hkdf_sha256(ikm: &[u8], info: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(None, ikm);
    let mut okm = [0u8; 32];
    hk.expand(info, &mut okm).expect("32 bytes is a valid HKDF-SHA256 output length");
    okm
}
