//! Fixture builders shared by the workspace's test suites: a valid
//! `AgentRecord` plus the private keys behind it, so a test can both
//! publish the record to an [`crate::InMemoryResolver`] and sign or seal
//! as that agent.

use std::str::FromStr;

use time::OffsetDateTime;

use sage_crypto::kem::KemPrivateKey;
use sage_crypto::signing::SigningKeypair;
use sage_types::agent::AgentRecord;
use sage_types::did::Did;

/// Builds a usable `AgentRecord` for `did`, along with the Ed25519
/// signing keypair and X25519 KEM private key it publishes.
pub fn agent_record(did: &str) -> (AgentRecord, SigningKeypair, KemPrivateKey) {
    let did = Did::from_str(did).expect("fixture dids must be well-formed");
    let signing = SigningKeypair::generate();
    let (kem_priv, kem_pub) = KemPrivateKey::generate();
    let now = OffsetDateTime::UNIX_EPOCH;

    let record = AgentRecord {
        did,
        sign_public_key: signing.verifying_key().to_bytes(),
        kem_public_key: kem_pub.to_bytes(),
        owner_address: "0xtestowner".to_string(),
        is_active: true,
        revoked: false,
        created_at: now,
        updated_at: now,
    };

    (record, signing, kem_priv)
}
