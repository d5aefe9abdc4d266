//! API DTOs (Data Transfer Objects)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::auth_context::AuthContextView;

// ============================================================================
// Form pages
// ============================================================================

/// Body returned by every GET form page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPageResponse<T: Serialize> {
    pub title: String,
    pub csrf_token: String,
    pub auth: AuthContextView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Re-rendered form after validation failure (422)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailedResponse<I: Serialize> {
    pub title: String,
    pub errors: Vec<String>,
    /// The submitted input, minus secrets
    pub input: I,
}

impl<I: Serialize> ValidationFailedResponse<I> {
    pub fn new(title: impl Into<String>, errors: Vec<String>, input: I) -> Self {
        Self {
            title: title.into(),
            errors,
            input,
        }
    }
}

impl<I: Serialize> IntoResponse for ValidationFailedResponse<I> {
    fn into_response(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign-up fields echoed back on failure
#[derive(Debug, Clone, Serialize)]
pub struct SignUpEcho {
    pub username: String,
    pub email: String,
}

// ============================================================================
// Log In
// ============================================================================

/// Log in request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogInEcho {
    pub email: String,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
}
