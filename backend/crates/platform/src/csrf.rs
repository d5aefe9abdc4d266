//! CSRF Protection
//!
//! Double-submit tokens: the same signed token travels in a cookie and in
//! the `X-CSRF-Token` header. A forged cross-site request can make the
//! browser send the cookie but cannot read it to fill the header.

use axum::http::Method;

use crate::crypto::{random_token, sign_value, verify_signed_value};

/// Header carrying the submitted token
pub const CSRF_HEADER: &str = "x-csrf-token";

const NONCE_BYTES: usize = 18;

/// Issue a fresh token bound to the application secret
pub fn issue_token(secret: &[u8]) -> String {
    sign_value(secret, &random_token(NONCE_BYTES))
}

/// Validate a submitted token against the cookie copy
pub fn validate_token(secret: &[u8], cookie: Option<&str>, submitted: Option<&str>) -> bool {
    match (cookie, submitted) {
        (Some(cookie), Some(submitted)) => {
            cookie == submitted && verify_signed_value(secret, submitted).is_some()
        }
        _ => false,
    }
}

/// Methods that never change state and are exempt from the check
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
