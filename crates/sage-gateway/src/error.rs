//! Conversions from each component crate's narrow error type into
//! [`sage_types::error::CoreError`] (§7). These live here rather than on
//! `CoreError` itself or on the component error types because neither
//! this crate nor `sage-types` owns both halves of most of these pairs —
//! ordinary orphan-rule adapter functions, not `From` impls.

use sage_handshake::HandshakeError;
use sage_resolver::ResolveError;
use sage_session::SessionError;
use sage_signature::SignatureError;
use sage_types::error::{
    AuthenticationError, CoreError, FreshnessError, ReplayError, ResourceError, SessionErrorKind,
};
use sage_validator::ValidationFailure;

pub fn from_signature_error(err: SignatureError) -> CoreError {
    match err {
        SignatureError::MalformedSignature => CoreError::Authentication(AuthenticationError::MalformedSignature),
        SignatureError::StaleSignature => CoreError::Authentication(AuthenticationError::StaleSignature),
        SignatureError::UnknownKey => CoreError::Authentication(AuthenticationError::UnknownKey),
        SignatureError::ReplayedSignature => CoreError::Replay(ReplayError::NonceReplayed),
        SignatureError::InvalidSignature => CoreError::Authentication(AuthenticationError::InvalidSignature),
    }
}

pub fn from_resolve_error(err: ResolveError) -> CoreError {
    match err {
        ResolveError::NotFound | ResolveError::Inactive => CoreError::Authentication(AuthenticationError::UnknownDid),
        ResolveError::Timeout => CoreError::Cancelled,
        ResolveError::Unavailable(msg) => CoreError::Resource(ResourceError::StoreUnavailable(msg)),
    }
}

pub fn from_session_error(err: SessionError) -> CoreError {
    match err {
        SessionError::Unknown => CoreError::Session(SessionErrorKind::UnknownSession),
        SessionError::Expired => CoreError::Session(SessionErrorKind::SessionExpired),
        SessionError::Revoked => CoreError::Session(SessionErrorKind::SessionRevoked),
        SessionError::Duplicate => CoreError::Session(SessionErrorKind::DuplicateSessionId),
        SessionError::StoreUnavailable(msg) => CoreError::Resource(ResourceError::StoreUnavailable(msg)),
    }
}

pub fn from_validation_failure(failure: ValidationFailure) -> CoreError {
    match failure {
        ValidationFailure::TimestampOutsideTolerance => CoreError::Freshness(FreshnessError::TimestampOutsideTolerance),
        ValidationFailure::NonceReplayed => CoreError::Replay(ReplayError::NonceReplayed),
        ValidationFailure::OutOfOrder => CoreError::Freshness(FreshnessError::OutOfOrder),
        ValidationFailure::DuplicateMessage => CoreError::Replay(ReplayError::DuplicateMessage),
    }
}

pub fn from_handshake_error(err: HandshakeError) -> CoreError {
    CoreError::Handshake(err.into())
}
