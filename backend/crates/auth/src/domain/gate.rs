//! Request Gate
//!
//! Decides whether a protected operation may proceed.

use crate::domain::auth_context::AuthContext;

/// Where unauthenticated callers are sent
pub const LOGIN_PATH: &str = "/login";

/// Where callers go after login, logout, or a forbidden mutation
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Deny { redirect_to: &'static str },
}

pub fn require_authenticated(ctx: &AuthContext) -> GateDecision {
    if ctx.is_authenticated() {
        GateDecision::Allow
    } else {
        GateDecision::Deny {
            redirect_to: LOGIN_PATH,
        }
    }
}
