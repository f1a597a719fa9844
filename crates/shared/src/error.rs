//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Domain modules carry their own error enums; this is the common
/// taxonomy they collapse into at the boundary to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (shape, sums, required fields).
    #[error("Validation error: {0}")]
    Validation(String),

    /// State machine precondition violated.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Actor lacks the role required for the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced fund or ledger does not exist.
    #[error("Referential error: {0}")]
    Referential(String),

    /// Conflict (e.g., concurrent update lost the race).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::InvalidTransition(_) => 409,
            Self::Unauthorized(_) => 403,
            Self::Referential(_) => 422,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Referential(_) => "REFERENTIAL_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
