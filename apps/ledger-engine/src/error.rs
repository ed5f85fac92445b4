//! Error taxonomy for the ledger engine.
//!
//! Every failure surfaced to a caller carries a stable error code and a
//! human-readable message; internal identifiers and stack traces are never
//! exposed. `NotFound` deliberately covers both "no such order" and "not
//! your order" so that ownership is never leaked by distinguishing the two.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_INPUT` | 400 | Malformed or out-of-range caller values |
//! | `INVALID_STATE` | 400 | Operation not legal for the order's status |
//! | `NOTHING_TO_EXECUTE` | 400 | No fillable quantity remains |
//! | `NOT_FOUND` | 404 | Entity absent or not owned by the caller |
//! | `UNAUTHENTICATED` | 401 | Identity resolution failed |
//! | `STORAGE_FAILURE` | 500 | Store unavailable or conflict after retries |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order::OrderError;
use crate::domain::shared::DomainError;

/// Error codes for the ledger engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-range caller-supplied values.
    InvalidInput,
    /// Entity absent, or present but not owned by the caller.
    NotFound,
    /// Operation not legal for the current order status.
    InvalidState,
    /// Remaining fillable quantity is zero.
    NothingToExecute,
    /// Identity resolution failed.
    Unauthenticated,
    /// Underlying store unavailable or write conflict after retries.
    StorageFailure,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput | Self::InvalidState | Self::NothingToExecute => 400,
            Self::Unauthenticated => 401,
            Self::NotFound => 404,
            Self::StorageFailure => 500,
        }
    }

    /// Get the stable error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidState => "INVALID_STATE",
            Self::NothingToExecute => "NOTHING_TO_EXECUTE",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::StorageFailure => "STORAGE_FAILURE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An engine error with a stable code and caller-safe message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct EngineError {
    code: ErrorCode,
    message: String,
}

impl EngineError {
    /// Create a new engine error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert to the wire-level error body.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
        }
    }

    /// Invalid caller-supplied input.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Order absent or not owned by the caller.
    #[must_use]
    pub fn order_not_found() -> Self {
        Self::new(ErrorCode::NotFound, "Order not found")
    }

    /// Identity resolution failed.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthenticated, "Authentication required")
    }

    /// Store unavailable or contended beyond the retry bound.
    #[must_use]
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailure, message)
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

impl From<OrderError> for EngineError {
    fn from(err: OrderError) -> Self {
        let code = match &err {
            OrderError::InvalidState { .. } => ErrorCode::InvalidState,
            OrderError::NothingToExecute => ErrorCode::NothingToExecute,
            OrderError::InvalidParameters { .. }
            | OrderError::FillExceedsRemaining { .. }
            | OrderError::AmendBelowExecuted { .. } => ErrorCode::InvalidInput,
        };
        Self::new(code, err.to_string())
    }
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        Self::new(ErrorCode::InvalidInput, err.to_string())
    }
}

/// Wire-level error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}
