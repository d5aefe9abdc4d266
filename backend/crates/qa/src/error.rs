//! Q&A Error Types
//!
//! Q&A-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Navigation outcomes (forbidden,
//! unauthenticated) render as the same redirects the auth crate uses.

use auth::presentation::redirect;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Q&A-specific result type alias
pub type QaResult<T> = Result<T, QaError>;

#[derive(Debug, Error)]
pub enum QaError {
    /// Field rules failed; one message per rule
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Question not found")]
    QuestionNotFound,

    #[error("Answer not found")]
    AnswerNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Authenticated caller does not own the target
    #[error("Access denied")]
    Forbidden,

    /// Reached a mutation without an identity
    #[error("Authentication required")]
    Unauthenticated,

    /// Backing store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QaError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            QaError::QuestionNotFound | QaError::AnswerNotFound | QaError::CommentNotFound => {
                StatusCode::NOT_FOUND
            }
            QaError::Forbidden | QaError::Unauthenticated => StatusCode::SEE_OTHER,
            QaError::StoreUnavailable(_) | QaError::Database(_) | QaError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QaError::Validation(_) => ErrorKind::UnprocessableEntity,
            QaError::QuestionNotFound | QaError::AnswerNotFound | QaError::CommentNotFound => {
                ErrorKind::NotFound
            }
            QaError::Forbidden => ErrorKind::Forbidden,
            QaError::Unauthenticated => ErrorKind::Unauthorized,
            QaError::StoreUnavailable(_) | QaError::Database(_) | QaError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            QaError::Validation(messages) => {
                AppError::unprocessable("Validation failed").with_details(messages.clone())
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            QaError::Database(e) => {
                tracing::error!(error = %e, "Q&A database error");
            }
            QaError::StoreUnavailable(msg) => {
                tracing::error!(message = %msg, "Q&A store unavailable");
            }
            QaError::Internal(msg) => {
                tracing::error!(message = %msg, "Q&A internal error");
            }
            QaError::Forbidden => {
                tracing::warn!("Mutation by non-owner rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Q&A error");
            }
        }
    }
}

impl IntoResponse for QaError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            QaError::Forbidden => redirect::access_denied(),
            QaError::Unauthenticated => redirect::login_required(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<auth::AuthError> for QaError {
    fn from(err: auth::AuthError) -> Self {
        match err {
            auth::AuthError::Unauthenticated => QaError::Unauthenticated,
            auth::AuthError::StoreUnavailable(msg) => QaError::StoreUnavailable(msg),
            auth::AuthError::Database(e) => QaError::Database(e),
            other => QaError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::presentation::redirect::ACCESS_DENIED_HEADER;
    use axum::http::header;

    #[test]
    fn test_forbidden_redirects_home() {
        let response = QaError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(response.headers()[ACCESS_DENIED_HEADER], "true");
    }

    #[test]
    fn test_not_found_is_a_problem_body() {
        let response = QaError::AnswerNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_unavailable_is_500() {
        let err = QaError::StoreUnavailable("down".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.kind().is_server_error());
    }
}
