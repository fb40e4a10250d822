//! SHA-256, used for the RFC 9421 `content-digest` header and for deriving
//! the HKDF `context_id` binding during handshake completion (§4.7).

use sha2::{Digest, Sha256};

/// `sha256(bytes) -> 32B`, per §4.1.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
