//! Auth Middleware
//!
//! - `require_csrf`: double-submit check on every state-changing request
//! - `resolve_identity`: session cookie → `AuthContext` request extension
//! - `require_authenticated`: request gate for protected routes

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::cookie::extract_cookie;
use platform::csrf::{CSRF_HEADER, is_safe_method, validate_token};

use crate::application::config::AuthConfig;
use crate::application::resolve_identity::ResolveIdentityUseCase;
use crate::domain::auth_context::AuthContext;
use crate::domain::gate::{self, GateDecision};
use crate::domain::repository::AuthRepositories;
use crate::presentation::handlers::AuthAppState;
use crate::presentation::redirect;

/// Resolve the caller's identity and attach it to the request.
///
/// A store failure aborts the request with 500; it never degrades to
/// anonymous.
pub async fn resolve_identity<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthRepositories,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);
    let use_case =
        ResolveIdentityUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Request gate: anonymous callers are redirected to the login page
pub async fn require_authenticated(req: Request, next: Next) -> Response {
    let decision = match req.extensions().get::<AuthContext>() {
        Some(ctx) => gate::require_authenticated(ctx),
        None => {
            tracing::error!(path = %req.uri().path(), "Gate reached without an auth context");
            gate::require_authenticated(&AuthContext::anonymous())
        }
    };

    match decision {
        GateDecision::Allow => next.run(req).await,
        GateDecision::Deny { redirect_to } => {
            tracing::debug!(
                path = %req.uri().path(),
                redirect_to,
                "Unauthenticated request denied"
            );
            redirect::login_required()
        }
    }
}

/// Reject unsafe methods without a matching CSRF cookie and header
pub async fn require_csrf(
    State(config): State<Arc<AuthConfig>>,
    req: Request,
    next: Next,
) -> Response {
    if is_safe_method(req.method()) {
        return next.run(req).await;
    }

    let cookie = extract_cookie(req.headers(), &config.csrf_cookie_name);
    let submitted = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok());

    if validate_token(&config.session_secret, cookie.as_deref(), submitted) {
        next.run(req).await
    } else {
        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "CSRF token missing or invalid"
        );
        AppError::forbidden("Invalid or missing CSRF token").into_response()
    }
}
