use thiserror::Error;

use sage_stores::SessionStoreError;

/// Session lifecycle errors, a thin reshaping of [`SessionStoreError`]
/// that also distinguishes a revoked session from an otherwise-expired
/// one once the caller has the session state in hand.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session not found")]
    Unknown,
    #[error("session expired")]
    Expired,
    #[error("session revoked")]
    Revoked,
    #[error("duplicate session id")]
    Duplicate,
    #[error("session store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<SessionStoreError> for SessionError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NotFound => SessionError::Unknown,
            SessionStoreError::Expired => SessionError::Expired,
            SessionStoreError::DuplicateSessionId => SessionError::Duplicate,
            SessionStoreError::Unavailable(msg) => SessionError::StoreUnavailable(msg),
        }
    }
}
