//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::id::UserId;
use platform::cookie::extract_cookie;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    SessionLifecycle, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::auth_context::{AuthContext, AuthContextView};
use crate::domain::entity::user::User;
use crate::domain::gate::HOME_PATH;
use crate::domain::repository::{AuthRepositories, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::csrf::CsrfIssue;
use crate::presentation::dto::{
    FormPageResponse, LogInEcho, LogInRequest, ProfileResponse, SignUpEcho, SignUpRequest,
    ValidationFailedResponse,
};
use crate::presentation::redirect;

/// Shared state for auth handlers and middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthRepositories,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: AuthRepositories,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    fn lifecycle(&self) -> SessionLifecycle<R, R> {
        SessionLifecycle::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }

    fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }

    /// Bind `user` to the session and redirect home with the new cookie
    async fn log_in_and_redirect(&self, headers: &HeaderMap, user: &User) -> AuthResult<Response> {
        let token = self
            .lifecycle()
            .login(self.session_token(headers).as_deref(), user)
            .await?;
        let cookie = self.config.session_cookie().build_set_cookie(&token);
        Ok(redirect::with_cookie(HOME_PATH, cookie))
    }
}

fn form_page(config: &AuthConfig, title: &str, ctx: &AuthContext) -> Response {
    let csrf = CsrfIssue::new(config);
    let body = FormPageResponse::<()> {
        title: title.to_string(),
        csrf_token: csrf.token.clone(),
        auth: ctx.view(),
        data: None,
    };
    (csrf.header(), Json(body)).into_response()
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signup
pub async fn sign_up_page<R>(State(state): State<AuthAppState<R>>, ctx: AuthContext) -> Response
where
    R: AuthRepositories,
{
    form_page(&state.config, "Sign Up", &ctx)
}

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Response>
where
    R: AuthRepositories,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    let echo = SignUpEcho {
        username: req.username.clone(),
        email: req.email.clone(),
    };

    let input = SignUpInput {
        user_name: req.username,
        email: req.email,
        password: req.password,
        confirm_password: req.confirm_password,
    };

    match use_case.execute(input).await {
        Ok(user) => state.log_in_and_redirect(&headers, &user).await,
        Err(AuthError::Validation(errors)) => {
            Ok(ValidationFailedResponse::new("Sign Up", errors, echo).into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Log In
// ============================================================================

/// GET /login
pub async fn log_in_page<R>(State(state): State<AuthAppState<R>>, ctx: AuthContext) -> Response
where
    R: AuthRepositories,
{
    form_page(&state.config, "Login", &ctx)
}

/// POST /login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<LogInRequest>,
) -> AuthResult<Response>
where
    R: AuthRepositories,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let echo = LogInEcho {
        email: req.email.clone(),
    };

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    match use_case.execute(input).await {
        Ok(user) => state.log_in_and_redirect(&headers, &user).await,
        Err(AuthError::Validation(errors)) => {
            Ok(ValidationFailedResponse::new("Log In", errors, echo).into_response())
        }
        Err(e) => Err(e),
    }
}

/// POST /login-demo
pub async fn demo_log_in<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthRepositories,
{
    let (_, token) = state
        .lifecycle()
        .demo_login(state.session_token(&headers).as_deref())
        .await?;
    let cookie = state.config.session_cookie().build_set_cookie(&token);
    Ok(redirect::with_cookie(HOME_PATH, cookie))
}

// ============================================================================
// Log Out
// ============================================================================

/// POST /logout
pub async fn log_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthRepositories,
{
    state
        .lifecycle()
        .logout(state.session_token(&headers).as_deref())
        .await?;
    let cookie = state.config.session_cookie().build_delete_cookie();
    Ok(redirect::with_cookie(HOME_PATH, cookie))
}

// ============================================================================
// Profile & Session
// ============================================================================

/// GET /profile (gated)
pub async fn my_profile(ctx: AuthContext) -> AuthResult<Redirect> {
    let user_id = ctx.user_id().ok_or(AuthError::Unauthenticated)?;
    Ok(Redirect::to(&format!("/users/{}/profile", user_id)))
}

/// GET /users/{id}/profile
pub async fn user_profile<R>(
    State(state): State<AuthAppState<R>>,
    Path(user_id): Path<UserId>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: AuthRepositories,
{
    let user = UserRepository::find_by_id(&*state.repo, user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(Json(ProfileResponse {
        id: user.user_id,
        username: user.user_name.to_string(),
    }))
}

/// GET /session
pub async fn session_status(ctx: AuthContext) -> Json<AuthContextView> {
    Json(ctx.view())
}
