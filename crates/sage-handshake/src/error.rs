use thiserror::Error;

/// Reference §4.7 invariants H1-H5.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeError {
    /// H1: a phase's signature, or the identity it claims, failed to
    /// authenticate.
    #[error("a handshake phase failed authentication")]
    AuthFailed,

    /// H4: a phase arrived for an unknown `context_id`, or in a state
    /// that does not expect it (e.g. Complete before Request).
    #[error("handshake phases arrived out of order or context_id is unknown")]
    ProtocolViolation,

    /// H3: the two sides derived different session keys. Detected on the
    /// first protected packet rather than here, but the variant lives in
    /// this crate's taxonomy since the handshake is what produced the
    /// mismatch.
    #[error("both sides derived different session keys")]
    KeyMismatch,

    /// H5: partial state older than the configured handshake timeout.
    #[error("handshake exceeded its timeout and was purged")]
    TimedOut,

    /// The resolved agent record for a party in this handshake is
    /// inactive, revoked, or could not be found.
    #[error("peer agent record is inactive, revoked, or unknown")]
    InactivePeer,

    /// The resolver could not be reached within its timeout.
    #[error("peer did resolution was unavailable: {0}")]
    ResolverUnavailable(String),
}

impl From<sage_resolver::ResolveError> for HandshakeError {
    fn from(err: sage_resolver::ResolveError) -> Self {
        use sage_resolver::ResolveError;
        match err {
            ResolveError::NotFound | ResolveError::Inactive => HandshakeError::InactivePeer,
            ResolveError::Timeout => HandshakeError::ResolverUnavailable("timed out".to_string()),
            ResolveError::Unavailable(msg) => HandshakeError::ResolverUnavailable(msg),
        }
    }
}

impl From<sage_types::did::DidParseError> for HandshakeError {
    fn from(_: sage_types::did::DidParseError) -> Self {
        HandshakeError::ProtocolViolation
    }
}

impl From<sage_crypto::CryptoError> for HandshakeError {
    fn from(_: sage_crypto::CryptoError) -> Self {
        HandshakeError::AuthFailed
    }
}

impl From<serde_json::Error> for HandshakeError {
    fn from(_: serde_json::Error) -> Self {
        HandshakeError::ProtocolViolation
    }
}

impl From<HandshakeError> for sage_types::error::HandshakeErrorKind {
    fn from(err: HandshakeError) -> Self {
        use sage_types::error::HandshakeErrorKind;
        match err {
            HandshakeError::AuthFailed | HandshakeError::InactivePeer => HandshakeErrorKind::AuthFailed,
            HandshakeError::ResolverUnavailable(_) => HandshakeErrorKind::AuthFailed,
            HandshakeError::ProtocolViolation => HandshakeErrorKind::ProtocolViolation,
            HandshakeError::KeyMismatch => HandshakeErrorKind::KeyMismatch,
            HandshakeError::TimedOut => HandshakeErrorKind::TimedOut,
        }
    }
}
