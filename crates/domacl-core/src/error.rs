//! Shared error type across domacl crates.

use thiserror::Error;

/// Stable error codes reported to callers and in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed config or provisioning input.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Write would widen a higher tier's bounds.
    ValidationRejected,
    /// No entry at the requested key.
    NotFound,
    /// Backend refused the write.
    StorageFailure,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::ValidationRejected => "VALIDATION_REJECTED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageFailure => "STORAGE_FAILURE",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DomAclError>;

/// Unified error type used by core and store.
#[derive(Debug, Error)]
pub enum DomAclError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("validation rejected: {0}")]
    ValidationRejected(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage failure: {0}")]
    StorageFailure(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl DomAclError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomAclError::BadRequest(_) => ErrorCode::BadRequest,
            DomAclError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            DomAclError::ValidationRejected(_) => ErrorCode::ValidationRejected,
            DomAclError::NotFound(_) => ErrorCode::NotFound,
            DomAclError::StorageFailure(_) => ErrorCode::StorageFailure,
            DomAclError::Internal(_) => ErrorCode::Internal,
        }
    }
}
