//! Single-shot HPKE seal/open, pinned to `DHKEM(X25519, HKDF-SHA256)` +
//! `HKDF-SHA256` + `ChaCha20Poly1305` (§4.1).
//!
//! Every handshake phase payload is sealed exactly once to the peer's
//! long-term `kem_public_key` and opened exactly once on arrival — there is
//! no long-lived bidirectional HPKE context anywhere in this protocol, so
//! the single-shot API is the right fit rather than holding open an
//! `AeadCtxS`/`AeadCtxR`.

use hpke::{
    aead::ChaCha20Poly1305 as HpkeChaCha20Poly1305, kdf::HkdfSha256, kem::X25519HkdfSha256,
    Deserializable, Kem as KemTrait, OpModeR, OpModeS, Serializable,
};
use rand_core::OsRng;

use crate::error::CryptoError;
use crate::kem::{KemPrivateKey, KemPublicKey};

type Kem = X25519HkdfSha256;
type Aead = HpkeChaCha20Poly1305;
type Kdf = HkdfSha256;

/// The HPKE encapsulated key produced by [`hpke_seal`], carried alongside
/// the ciphertext so the recipient can run [`hpke_open`].
#[derive(Debug, Clone)]
pub struct HpkeEncapsulatedKey(Vec<u8>);

impl HpkeEncapsulatedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for HpkeEncapsulatedKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// `hpke_setup_sender` + `ctx.seal` collapsed into one single-shot call,
/// yielding `(enc, ct)` per §4.1.
pub fn hpke_seal(
    recipient_public: &KemPublicKey,
    info: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(HpkeEncapsulatedKey, Vec<u8>), CryptoError> {
    let recipient_public = <Kem as KemTrait>::PublicKey::from_bytes(&recipient_public.to_bytes())
        .map_err(|_| CryptoError::HpkeFailure)?;

    let mut csprng = OsRng;
    let (encapped, ciphertext) = hpke::single_shot_seal::<Aead, Kdf, Kem, _>(
        &OpModeS::Base,
        &recipient_public,
        info,
        plaintext,
        aad,
        &mut csprng,
    )
    .map_err(|_| CryptoError::HpkeFailure)?;

    Ok((HpkeEncapsulatedKey(encapped.to_bytes().to_vec()), ciphertext))
}

/// `hpke_setup_recipient` + `ctx.open` collapsed into one single-shot call.
pub fn hpke_open(
    recipient_private: &KemPrivateKey,
    encapped: &HpkeEncapsulatedKey,
    info: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let recipient_private = <Kem as KemTrait>::PrivateKey::from_bytes(&recipient_private.to_bytes())
        .map_err(|_| CryptoError::HpkeFailure)?;
    let encapped_key =
        <Kem as KemTrait>::EncappedKey::from_bytes(&encapped.0).map_err(|_| CryptoError::HpkeFailure)?;

    hpke::single_shot_open::<Aead, Kdf, Kem>(
        &OpModeR::Base,
        &recipient_private,
        &encapped_key,
        info,
        ciphertext,
        aad,
    )
    .map_err(|_| CryptoError::HpkeFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_seal_and_open() {
        let (recipient_priv, recipient_pub) = KemPrivateKey::generate();
        let info = b"sage-handshake-invitation";
        let aad = b"context-id-bytes";
        let plaintext = b"{\"sender_did\":\"did:sage:ethereum:0xabc\"}";

        let (enc, ciphertext) = hpke_seal(&recipient_pub, info, aad, plaintext).unwrap();
        let opened = hpke_open(&recipient_priv, &enc, info, aad, &ciphertext).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn rejects_wrong_recipient() {
        let (_, recipient_pub) = KemPrivateKey::generate();
        let (wrong_priv, _) = KemPrivateKey::generate();
        let info = b"sage-handshake-invitation";
        let aad = b"context-id-bytes";

        let (enc, ciphertext) = hpke_seal(&recipient_pub, info, aad, b"payload").unwrap();
        assert!(hpke_open(&wrong_priv, &enc, info, aad, &ciphertext).is_err());
    }

    #[test]
    fn rejects_tampered_aad() {
        let (recipient_priv, recipient_pub) = KemPrivateKey::generate();
        let info = b"sage-handshake-invitation";

        let (enc, ciphertext) = hpke_seal(&recipient_pub, info, b"aad-a", b"payload").unwrap();
        assert!(hpke_open(&recipient_priv, &enc, info, b"aad-b", &ciphertext).is_err());
    }
}
