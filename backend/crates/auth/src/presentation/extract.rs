//! Extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::auth_context::AuthContext;
use crate::error::AuthError;

/// Pulls the context placed by `resolve_identity`.
///
/// Fails with an internal error if the middleware was not installed.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AuthError::Internal("identity resolver middleware not installed".into()))
    }
}
