use thiserror::Error;

/// Errors a `DidResolver` implementation may return.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no agent record is published for this did")]
    NotFound,

    #[error("agent record exists but is inactive or revoked")]
    Inactive,

    #[error("resolver lookup timed out")]
    Timeout,

    #[error("resolver backend unavailable: {0}")]
    Unavailable(String),
}
