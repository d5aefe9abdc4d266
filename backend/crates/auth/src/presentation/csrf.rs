//! CSRF token issuing for form pages

use axum::http::{HeaderName, header};

use crate::application::config::AuthConfig;

/// A freshly issued double-submit token
pub struct CsrfIssue {
    /// Echo back in the `X-CSRF-Token` header
    pub token: String,
    /// `Set-Cookie` value carrying the same token
    pub set_cookie: String,
}

impl CsrfIssue {
    pub fn new(config: &AuthConfig) -> Self {
        let token = platform::csrf::issue_token(&config.session_secret);
        let set_cookie = config.csrf_cookie().build_set_cookie(&token);
        Self { token, set_cookie }
    }

    /// Header pair for a response tuple
    pub fn header(&self) -> [(HeaderName, String); 1] {
        [(header::SET_COOKIE, self.set_cookie.clone())]
    }
}
