//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use electron_core::{DocumentError, IdError};

use crate::db::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    /// Path identifier is not a valid document id.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// Request body cannot be stored.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(StoreError::DuplicateKey(_)) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidId(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(StoreError::Unavailable(_)) => "Service unavailable".to_string(),
            Self::Database(StoreError::DuplicateKey(_)) => {
                "A document with this id already exists".to_string()
            }
            Self::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
