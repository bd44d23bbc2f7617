//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Services fold
//! it into the response envelope; the HTTP boundary renders it directly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::types::ApiResponse;

/// Application error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    // Resource errors
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    Conflict(String),

    // Validation & business rules
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    RuleViolation(String),

    #[error("Insufficient stock")]
    InsufficientStock,

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_)
            | AppError::Validation(_)
            | AppError::RuleViolation(_)
            | AppError::InsufficientStock
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details).
    ///
    /// `fallback` replaces the message of internal errors, e.g.
    /// "Failed to create user".
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                fallback.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse::<()>::failure(self.user_message("Internal server error"));

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFound(entity))
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn rule(msg: impl Into<String>) -> Self {
        AppError::RuleViolation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(AppError::NotFound("User").to_string(), "User not found");
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::internal("lock poisoned");
        assert_eq!(err.user_message("Failed to create user"), "Failed to create user");
    }

    #[test]
    fn test_domain_message_is_kept() {
        let err = AppError::conflict("User with this email");
        assert_eq!(
            err.user_message("Failed to create user"),
            "User with this email already exists"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound("Product").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InsufficientStock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
