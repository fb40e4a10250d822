//! Decentralized Identifier syntax and parsing.
//!
//! Reference: `did:sage:<chain>:<chain-specific-id>`. Chains recognized are
//! `ethereum`, `solana`, and `test` (used for local/integration testing
//! chains that have no real registry). Total length must be 10..=2048 and
//! the value must begin with the literal prefix `did:sage:`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFIX: &str = "did:sage:";
const MIN_LEN: usize = 10;
const MAX_LEN: usize = 2048;

/// The blockchain a DID is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Solana,
    /// Synthetic chain used by test fixtures and local deployments; its
    /// chain-specific id is a UUID rather than a real address.
    Test,
}

impl Chain {
    fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Solana => "solana",
            Chain::Test => "test",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = DidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ethereum" => Ok(Chain::Ethereum),
            "solana" => Ok(Chain::Solana),
            "test" => Ok(Chain::Test),
            other => Err(DidParseError::UnknownChain(other.to_string())),
        }
    }
}

/// A parsed `did:sage:<chain>:<chain-specific-id>` identifier.
///
/// `Did` does not validate that the chain-specific id is a real, live
/// address on the named chain — that is the DID registry's job, entirely
/// out of scope for this crate. It only validates syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did {
    chain: Chain,
    chain_specific_id: String,
    raw: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DidParseError {
    #[error("DID length {0} outside the allowed range [{MIN_LEN}, {MAX_LEN}]")]
    InvalidLength(usize),
    #[error("DID must begin with \"{PREFIX}\"")]
    MissingPrefix,
    #[error("DID is missing the chain-specific id segment")]
    MissingChainSpecificId,
    #[error("unknown chain {0:?}")]
    UnknownChain(String),
    #[error("chain-specific id must not be empty")]
    EmptyChainSpecificId,
}

impl Did {
    /// Parse and validate a DID string per §6.3.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DidParseError> {
        let raw = raw.into();

        if raw.len() < MIN_LEN || raw.len() > MAX_LEN {
            return Err(DidParseError::InvalidLength(raw.len()));
        }
        let rest = raw.strip_prefix(PREFIX).ok_or(DidParseError::MissingPrefix)?;

        let (chain_str, chain_specific_id) =
            rest.split_once(':').ok_or(DidParseError::MissingChainSpecificId)?;

        if chain_specific_id.is_empty() {
            return Err(DidParseError::EmptyChainSpecificId);
        }

        let chain: Chain = chain_str.parse()?;

        Ok(Self {
            chain,
            chain_specific_id: chain_specific_id.to_string(),
            raw,
        })
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn chain_specific_id(&self) -> &str {
        &self.chain_specific_id
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Did {
    type Err = DidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Did::parse(s)
    }
}

impl TryFrom<String> for Did {
    type Error = DidParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Did::parse(value)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ethereum_did() {
        let did = Did::parse("did:sage:ethereum:0xabc1230000000000000000000000000000dead").unwrap();
        assert_eq!(did.chain(), Chain::Ethereum);
        assert_eq!(
            did.chain_specific_id(),
            "0xabc1230000000000000000000000000000dead"
        );
    }

    #[test]
    fn parses_solana_did() {
        let did = Did::parse("did:sage:solana:4Nd1mYHqXn9EwVT5wmFQn4nRu1PLAHVzQj2n8nxZcS3z").unwrap();
        assert_eq!(did.chain(), Chain::Solana);
    }

    #[test]
    fn parses_test_chain_uuid() {
        let did = Did::parse("did:sage:test:550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(did.chain(), Chain::Test);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(
            Did::parse("sage:ethereum:0xabc"),
            Err(DidParseError::MissingPrefix)
        );
    }

    #[test]
    fn rejects_unknown_chain() {
        assert_eq!(
            Did::parse("did:sage:bitcoin:abcdef1234"),
            Err(DidParseError::UnknownChain("bitcoin".to_string()))
        );
    }

    #[test]
    fn rejects_empty_chain_specific_id() {
        assert_eq!(
            Did::parse("did:sage:ethereum:"),
            Err(DidParseError::EmptyChainSpecificId)
        );
    }

    #[test]
    fn rejects_too_short() {
        assert_eq!(Did::parse("did:sage:"), Err(DidParseError::InvalidLength(9)));
    }

    #[test]
    fn rejects_too_long() {
        let long_id = "a".repeat(3000);
        let raw = format!("did:sage:ethereum:{long_id}");
        assert!(matches!(Did::parse(raw), Err(DidParseError::InvalidLength(_))));
    }

    #[test]
    fn round_trips_through_display() {
        let raw = "did:sage:ethereum:0xabc1230000000000000000000000000000dead";
        let did = Did::parse(raw).unwrap();
        assert_eq!(did.to_string(), raw);
    }
}
