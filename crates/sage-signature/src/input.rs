//! The `Signature-Input`/`Signature` value pair, modelled as plain structs
//! with `Display`/`FromStr` rather than tied to any HTTP header type — a
//! caller with a real wire transport maps these into whatever header
//! representation it uses; this crate does not touch a socket.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::SignatureError;
use crate::COVERED_COMPONENTS;

pub const ALG_ED25519: &str = "ed25519";

/// The `@signature-params` value: the covered-component list plus the
/// `created`, `keyid`, `alg`, and `nonce` parameters (§4.6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInput {
    pub created: i64,
    pub keyid: String,
    pub nonce: String,
}

impl fmt::Display for SignatureInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, component) in COVERED_COMPONENTS.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "\"{component}\"")?;
        }
        write!(
            f,
            ");created={};keyid=\"{}\";alg=\"{ALG_ED25519}\";nonce=\"{}\"",
            self.created, self.keyid, self.nonce
        )
    }
}

impl FromStr for SignatureInput {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let params_start = s.find(')').ok_or(SignatureError::MalformedSignature)?;
        let components_part = &s[1..params_start];
        let expected = COVERED_COMPONENTS.join("\" \"");
        let expected = format!("\"{expected}\"");
        if components_part != expected {
            return Err(SignatureError::MalformedSignature);
        }

        let params_part = s[params_start + 1..]
            .strip_prefix(';')
            .ok_or(SignatureError::MalformedSignature)?;

        let mut created = None;
        let mut keyid = None;
        let mut alg = None;
        let mut nonce = None;

        for param in params_part.split(';') {
            let (key, value) = param.split_once('=').ok_or(SignatureError::MalformedSignature)?;
            let value = value.trim_matches('"');
            match key {
                "created" => {
                    created = Some(value.parse::<i64>().map_err(|_| SignatureError::MalformedSignature)?)
                }
                "keyid" => keyid = Some(value.to_string()),
                "alg" => alg = Some(value.to_string()),
                "nonce" => nonce = Some(value.to_string()),
                _ => return Err(SignatureError::MalformedSignature),
            }
        }

        if alg.as_deref() != Some(ALG_ED25519) {
            return Err(SignatureError::MalformedSignature);
        }

        Ok(Self {
            created: created.ok_or(SignatureError::MalformedSignature)?,
            keyid: keyid.ok_or(SignatureError::MalformedSignature)?,
            nonce: nonce.ok_or(SignatureError::MalformedSignature)?,
        })
    }
}

/// The `Signature` header value: `sig1=:<base64(ed25519 signature)>:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sig1=:{}:", BASE64.encode(self.0))
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .strip_prefix("sig1=:")
            .and_then(|rest| rest.strip_suffix(':'))
            .ok_or(SignatureError::MalformedSignature)?;
        let bytes = BASE64.decode(inner).map_err(|_| SignatureError::MalformedSignature)?;
        let bytes: [u8; 64] = bytes.try_into().map_err(|_| SignatureError::MalformedSignature)?;
        Ok(Self(bytes))
    }
}
