//! # AppError
//!
//! Centralized error handling for Rusty-Links.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all rl-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// Resource not found (e.g., upvoting an unknown submission)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., missing title or url)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Infrastructure failure (e.g., database unavailable)
    #[error("internal service error: {0}")]
    Internal(String),

    /// The stored row changed underneath a compare-and-set write
    #[error("conflict: {0}")]
    Conflict(String),
}

impl AppError {
    pub fn submission_not_found(id: impl ToString) -> Self {
        AppError::NotFound("submission".to_string(), id.to_string())
    }
}

/// A specialized Result type for Rusty-Links logic.
pub type Result<T> = std::result::Result<T, AppError>;
