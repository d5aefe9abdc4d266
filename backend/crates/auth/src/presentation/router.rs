//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthRepositories;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_authenticated, require_csrf, resolve_identity};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), config)
}

/// Create a generic Auth router for any repository implementation.
///
/// Handlers read the `AuthContext`, so the composed app must be wrapped
/// with `install_request_guards`.
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AuthRepositories,
{
    let state = AuthAppState::new(repo, config);

    let gated: Router<AuthAppState<R>> = Router::new()
        .route("/profile", get(handlers::my_profile))
        .route_layer(middleware::from_fn(require_authenticated));

    Router::new()
        .route(
            "/signup",
            get(handlers::sign_up_page::<R>).post(handlers::sign_up::<R>),
        )
        .route(
            "/login",
            get(handlers::log_in_page::<R>).post(handlers::log_in::<R>),
        )
        .route("/login-demo", post(handlers::demo_log_in::<R>))
        .route("/logout", post(handlers::log_out::<R>))
        .route("/users/{id}/profile", get(handlers::user_profile::<R>))
        .route("/session", get(handlers::session_status))
        .merge(gated)
        .with_state(state)
}

/// Wrap a composed app with CSRF enforcement and identity resolution.
///
/// CSRF runs first, so forged requests never touch the session store.
pub fn install_request_guards<R>(router: Router, repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: AuthRepositories,
{
    let state = AuthAppState::new(repo, config.clone());
    router
        .layer(middleware::from_fn_with_state(state, resolve_identity::<R>))
        .layer(middleware::from_fn_with_state(config, require_csrf))
}
