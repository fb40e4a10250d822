//! The error taxonomy shared across the security engine.
//!
//! Reference §7. Every narrower error enum in the component crates
//! (`SignatureError`, `HandshakeError`, `ValidationError`, `SessionError`,
//! ...) converts into `CoreError` via `From`, so a caller sitting above all
//! of them (namely `sage-gateway`) only ever has to match one type.

use std::fmt;

use thiserror::Error;

/// The seven error kinds of §7, each carrying enough context to produce a
/// structured audit event and map to a wire error code.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Signature, key, or DID resolution failed.
    #[error("authentication failed: {0}")]
    Authentication(AuthenticationError),

    /// Nonce or message-id reused.
    #[error("replay detected: {0}")]
    Replay(ReplayError),

    /// Timestamp outside tolerance, or stale signature `created`.
    #[error("freshness check failed: {0}")]
    Freshness(FreshnessError),

    /// Unknown, expired, or revoked session.
    #[error("session error: {0}")]
    Session(SessionErrorKind),

    /// Protocol phase or cryptographic mismatch during handshake setup.
    #[error("handshake error: {0}")]
    Handshake(HandshakeErrorKind),

    /// Overloaded or a backing store is unavailable; may be retryable.
    #[error("resource error: {0}")]
    Resource(ResourceError),

    /// Invariant violation or unexpected condition. Never leaks state to
    /// the caller beyond this generic message.
    #[error("internal error")]
    Internal,

    /// A long-running operation (resolver lookup, store call, HPKE
    /// seal/open) was cancelled before completion.
    #[error("operation cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("signature header missing or malformed")]
    MalformedSignature,
    #[error("signature algorithm must be ed25519")]
    UnsupportedAlgorithm,
    #[error("signature created outside max clock skew")]
    StaleSignature,
    #[error("key lookup for keyid failed")]
    UnknownKey,
    #[error("ed25519 verification failed")]
    InvalidSignature,
    #[error("did could not be resolved or is inactive")]
    UnknownDid,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("nonce already observed within its ttl")]
    NonceReplayed,
    #[error("message-id already observed within duplicate ttl")]
    DuplicateMessage,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FreshnessError {
    #[error("timestamp outside tolerance window")]
    TimestampOutsideTolerance,
    #[error("signature created timestamp outside max clock skew")]
    ClockSkew,
    #[error("order validation failed")]
    OutOfOrder,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionErrorKind {
    #[error("session not found")]
    UnknownSession,
    #[error("session expired")]
    SessionExpired,
    #[error("session revoked")]
    SessionRevoked,
    #[error("duplicate session id")]
    DuplicateSessionId,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HandshakeErrorKind {
    #[error("a handshake phase failed authentication")]
    AuthFailed,
    #[error("handshake phases arrived out of order or context_id is unknown")]
    ProtocolViolation,
    #[error("both sides derived different session keys")]
    KeyMismatch,
    #[error("handshake exceeded its timeout and was purged")]
    TimedOut,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("worker pool saturated")]
    Overloaded,
    #[error("backing store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CoreError {
    /// Whether a caller may retry this error per standard transport
    /// conventions (§7 "Recovery policy"). Only `Resource` errors are
    /// retryable; everything else is terminal for the current packet or
    /// handshake attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Resource(_))
    }

    /// The wire error code this error maps to (§6.6).
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Authentication(AuthenticationError::MalformedSignature) => {
                ErrorCode::InvalidSignature
            }
            CoreError::Authentication(AuthenticationError::UnsupportedAlgorithm) => {
                ErrorCode::InvalidSignature
            }
            CoreError::Authentication(AuthenticationError::StaleSignature) => {
                ErrorCode::StaleSignature
            }
            CoreError::Authentication(AuthenticationError::UnknownKey) => ErrorCode::UnknownKey,
            CoreError::Authentication(AuthenticationError::InvalidSignature) => {
                ErrorCode::InvalidSignature
            }
            CoreError::Authentication(AuthenticationError::UnknownDid) => ErrorCode::UnknownDid,
            CoreError::Replay(_) => ErrorCode::ReplayAttack,
            CoreError::Freshness(FreshnessError::ClockSkew) => ErrorCode::ClockSkew,
            CoreError::Freshness(_) => ErrorCode::ClockSkew,
            CoreError::Session(SessionErrorKind::UnknownSession) => ErrorCode::UnknownSession,
            CoreError::Session(_) => ErrorCode::SessionExpired,
            CoreError::Handshake(HandshakeErrorKind::ProtocolViolation) => {
                ErrorCode::HandshakeProtocolViolation
            }
            CoreError::Handshake(_) => ErrorCode::HandshakeAuthFailed,
            CoreError::Resource(_) => ErrorCode::Overloaded,
            CoreError::Internal | CoreError::Cancelled => ErrorCode::Overloaded,
        }
    }
}

/// The wire error codes surfaced to callers, per §6.6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingSignature,
    InvalidSignature,
    StaleSignature,
    UnknownKey,
    ReplayAttack,
    ClockSkew,
    SessionExpired,
    UnknownSession,
    HandshakeAuthFailed,
    HandshakeProtocolViolation,
    UnknownDid,
    Overloaded,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MissingSignature => "MISSING_SIGNATURE",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::StaleSignature => "STALE_SIGNATURE",
            ErrorCode::UnknownKey => "UNKNOWN_KEY",
            ErrorCode::ReplayAttack => "REPLAY_ATTACK",
            ErrorCode::ClockSkew => "CLOCK_SKEW",
            ErrorCode::SessionExpired => "SESSION_EXPIRED",
            ErrorCode::UnknownSession => "UNKNOWN_SESSION",
            ErrorCode::HandshakeAuthFailed => "HANDSHAKE_AUTH_FAILED",
            ErrorCode::HandshakeProtocolViolation => "HANDSHAKE_PROTOCOL_VIOLATION",
            ErrorCode::UnknownDid => "UNKNOWN_DID",
            ErrorCode::Overloaded => "OVERLOADED",
        };
        f.write_str(s)
    }
}
