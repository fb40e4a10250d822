use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("session not found")]
    NotFound,

    #[error("session has expired")]
    Expired,

    #[error("a session already exists under this id")]
    DuplicateSessionId,

    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}
