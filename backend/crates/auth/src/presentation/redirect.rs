//! Redirect Responses
//!
//! Every auth outcome that ends in navigation goes through here so the
//! marker headers stay consistent.

use axum::http::{HeaderName, header};
use axum::response::{IntoResponse, Redirect, Response};

use crate::domain::gate::{HOME_PATH, LOGIN_PATH};

/// Set on redirects produced by the request gate
pub const AUTH_REQUIRED_HEADER: HeaderName = HeaderName::from_static("x-auth-required");

/// Set on redirects produced by a failed ownership check
pub const ACCESS_DENIED_HEADER: HeaderName = HeaderName::from_static("x-access-denied");

/// 303 to the login page
pub fn login_required() -> Response {
    ([(AUTH_REQUIRED_HEADER, "true")], Redirect::to(LOGIN_PATH)).into_response()
}

/// 303 home for a caller who does not own the target
pub fn access_denied() -> Response {
    ([(ACCESS_DENIED_HEADER, "true")], Redirect::to(HOME_PATH)).into_response()
}

/// 303 to `location` while setting a cookie
pub fn with_cookie(location: &str, set_cookie: String) -> Response {
    ([(header::SET_COOKIE, set_cookie)], Redirect::to(location)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_access_denied_goes_home() {
        let response = access_denied();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(response.headers()[ACCESS_DENIED_HEADER], "true");
    }

    #[test]
    fn test_with_cookie_sets_header() {
        let response = with_cookie("/", "a=b; Path=/".to_string());
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::SET_COOKIE], "a=b; Path=/");
    }
}
