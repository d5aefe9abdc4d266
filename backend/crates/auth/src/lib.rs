//! Auth (Authentication & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, the per-request `AuthContext`,
//!   the request gate and the ownership evaluator
//! - `application/` - Use cases: identity resolution, session lifecycle,
//!   sign up / sign in
//! - `infra/` - Postgres and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Request flow
//! 1. `require_csrf` rejects forged state-changing requests
//! 2. `resolve_identity` turns the session cookie into an `AuthContext`
//! 3. `require_authenticated` redirects anonymous callers to `/login`
//! 4. handlers decorate loaded resources via `authorization::decorate`
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Session cookies carry an HMAC-signed session id; the payload
//!   (`SessionData`) lives server-side
//! - A session that references a vanished user resolves as anonymous

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::auth_context::AuthContext;
pub use domain::authorization::{Authorized, Owned, authorize, decorate, decorate_all};
pub use domain::repository::AuthRepositories;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::router::{auth_router, auth_router_generic, install_request_guards};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
