use std::fmt;

/// Which validation check, if any, failed. Mirrors the `CoreError`
/// variants each maps to, kept separate so this crate has no dependency
/// on `sage-types::error` beyond what individual component crates choose
/// to map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    TimestampOutsideTolerance,
    NonceReplayed,
    OutOfOrder,
    DuplicateMessage,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationFailure::TimestampOutsideTolerance => "timestamp outside tolerance",
            ValidationFailure::NonceReplayed => "nonce replayed",
            ValidationFailure::OutOfOrder => "packet out of order",
            ValidationFailure::DuplicateMessage => "duplicate message id",
        };
        f.write_str(s)
    }
}

/// The outcome of running [`crate::MessageValidator::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    error: Option<ValidationFailure>,
}

impl ValidationResult {
    pub(crate) fn success() -> Self {
        Self { error: None }
    }

    pub(crate) fn failure(failure: ValidationFailure) -> Self {
        Self { error: Some(failure) }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_replay(&self) -> bool {
        self.error == Some(ValidationFailure::NonceReplayed)
    }

    pub fn is_duplicate(&self) -> bool {
        self.error == Some(ValidationFailure::DuplicateMessage)
    }

    pub fn is_out_of_order(&self) -> bool {
        self.error == Some(ValidationFailure::OutOfOrder)
    }

    pub fn error(&self) -> Option<ValidationFailure> {
        self.error
    }
}
