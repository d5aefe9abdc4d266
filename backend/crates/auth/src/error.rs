//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::presentation::redirect;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Field or uniqueness rules failed; one message per rule
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Email already registered (raised by the store on insert)
    #[error("The provided Email Address is already in use by another account")]
    EmailTaken,

    /// Directly requested user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Request gate denial
    #[error("Authentication required")]
    Unauthenticated,

    /// Session or credential store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::EmailTaken => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Unauthenticated => StatusCode::SEE_OTHER,
            AuthError::StoreUnavailable(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::EmailTaken => ErrorKind::UnprocessableEntity,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::StoreUnavailable(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// True for I/O faults that must fail the request
    pub fn is_store_fault(&self) -> bool {
        matches!(self, AuthError::StoreUnavailable(_) | AuthError::Database(_))
    }

    /// Human-readable messages for re-rendering a form
    pub fn messages(&self) -> Vec<String> {
        match self {
            AuthError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(_) | AuthError::EmailTaken => {
                AppError::unprocessable("Validation failed").with_details(self.messages())
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        if self.is_store_fault() {
            tracing::error!(error = %self, "Auth store unavailable");
            return;
        }
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            AuthError::Unauthenticated => redirect::login_required(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
