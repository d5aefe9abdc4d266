//! End-to-end scenarios against the auth router backed by the in-memory
//! store.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::application::{SignUpUseCase, session_token};
use crate::domain::entity::session::{Session, SessionData};
use crate::domain::repository::SessionRepository;
use crate::presentation::redirect::{ACCESS_DENIED_HEADER, AUTH_REQUIRED_HEADER};
use crate::{AuthConfig, InMemoryAuthRepository, auth_router_generic, install_request_guards};

const PASSWORD: &str = "Passw0rd!";

struct Harness {
    repo: Arc<InMemoryAuthRepository>,
    config: Arc<AuthConfig>,
    app: Router,
    csrf: String,
}

impl Harness {
    fn new() -> Self {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());
        let app = install_request_guards(
            auth_router_generic(repo.clone(), config.clone()),
            repo.clone(),
            config.clone(),
        );
        let csrf = platform::csrf::issue_token(&config.session_secret);
        Self {
            repo,
            config,
            app,
            csrf,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut cookies = vec![format!("{}={}", self.config.csrf_cookie_name, self.csrf)];
        if let Some(token) = session {
            cookies.push(format!("{}={}", self.config.session_cookie_name, token));
        }

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookies.join("; "))
            .header(platform::csrf::CSRF_HEADER, &self.csrf);

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn get(&self, uri: &str, session: Option<&str>) -> Response {
        self.send(Method::GET, uri, session, None).await
    }

    async fn post(&self, uri: &str, session: Option<&str>, body: Value) -> Response {
        self.send(Method::POST, uri, session, Some(body)).await
    }

    async fn sign_up(&self, username: &str, email: &str) -> String {
        let response = self
            .post(
                "/signup",
                None,
                json!({
                    "username": username,
                    "email": email,
                    "password": PASSWORD,
                    "confirmPassword": PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response, &self.config).expect("session cookie issued")
    }

    async fn whoami(&self, session: Option<&str>) -> Value {
        let response = self.get("/session", session).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }
}

fn session_cookie(response: &Response, config: &AuthConfig) -> Option<String> {
    let prefix = format!("{}=", config.session_cookie_name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix(&prefix))
        .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Sign up / log in
// ============================================================================

#[tokio::test]
async fn sign_up_logs_the_new_user_in() {
    let h = Harness::new();
    let token = h.sign_up("dogelord", "doge@example.com").await;

    let me = h.whoami(Some(&token)).await;
    assert_eq!(me["isAuthenticated"], true);
    assert_eq!(me["userId"], 1);
    assert_eq!(me["userName"], "dogelord");
}

#[tokio::test]
async fn sign_up_reports_every_failing_field_in_order() {
    let h = Harness::new();
    let response = h.post("/signup", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(
        body["errors"],
        json!([
            "Please provide a value for Username",
            "Please provide a value for Email Address",
            "Please provide a value for Password",
            "Please provide a value for Confirm Password",
        ])
    );
}

#[tokio::test]
async fn sign_up_echoes_input_without_password() {
    let h = Harness::new();
    let response = h
        .post(
            "/signup",
            None,
            json!({
                "username": "cat",
                "email": "cat@example.com",
                "password": "weakpass",
                "confirmPassword": "different",
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["input"], json!({ "username": "cat", "email": "cat@example.com" }));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1], "Confirm Password does not match Password");
    assert!(!body.to_string().contains("weakpass"));
}

#[tokio::test]
async fn sign_up_rejects_a_registered_email() {
    let h = Harness::new();
    h.sign_up("first", "taken@example.com").await;

    let response = h
        .post(
            "/signup",
            None,
            json!({
                "username": "second",
                "email": "Taken@Example.com",
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["errors"],
        json!(["The provided Email Address is already in use by another account"])
    );
    assert_eq!(h.repo.user_count().await, 1);
}

#[tokio::test]
async fn log_in_with_valid_credentials() {
    let h = Harness::new();
    h.sign_up("dogelord", "doge@example.com").await;

    let response = h
        .post("/login", None, json!({ "email": "doge@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let token = session_cookie(&response, &h.config).unwrap();
    assert_eq!(h.whoami(Some(&token)).await["userId"], 1);
}

#[tokio::test]
async fn log_in_failures_do_not_reveal_which_part_was_wrong() {
    let h = Harness::new();
    h.sign_up("dogelord", "doge@example.com").await;

    for body in [
        json!({ "email": "doge@example.com", "password": "Wr0ng!pass" }),
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    ] {
        let response = h.post("/login", None, body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(session_cookie(&response, &h.config).is_none());
        assert_eq!(
            body_json(response).await["errors"],
            json!(["Invalid email address and/or password"])
        );
    }
}

#[tokio::test]
async fn log_in_reuses_a_valid_incoming_session_id() {
    let h = Harness::new();
    let first = h.sign_up("dogelord", "doge@example.com").await;

    let response = h
        .post("/login", Some(&first), json!({ "email": "doge@example.com", "password": PASSWORD }))
        .await;
    let second = session_cookie(&response, &h.config).unwrap();

    assert_eq!(first, second);
    assert_eq!(h.repo.session_count().await, 1);
}

// ============================================================================
// Demo login / logout
// ============================================================================

#[tokio::test]
async fn demo_log_in_requires_the_bootstrap_account() {
    let h = Harness::new();
    let response = h.post("/login-demo", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let demo = SignUpUseCase::new(h.repo.clone(), h.config.clone())
        .ensure_demo_account()
        .await
        .unwrap();

    let response = h.post("/login-demo", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let token = session_cookie(&response, &h.config).unwrap();
    assert_eq!(h.whoami(Some(&token)).await["userId"], demo.user_id.value());
}

#[tokio::test]
async fn ensure_demo_account_is_idempotent() {
    let h = Harness::new();
    let use_case = SignUpUseCase::new(h.repo.clone(), h.config.clone());
    let a = use_case.ensure_demo_account().await.unwrap();
    let b = use_case.ensure_demo_account().await.unwrap();
    assert_eq!(a.user_id, b.user_id);
}

#[tokio::test]
async fn log_out_removes_the_session() {
    let h = Harness::new();
    let token = h.sign_up("dogelord", "doge@example.com").await;

    let response = h.post("/logout", Some(&token), json!({})).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    assert_eq!(h.repo.session_count().await, 0);
    assert_eq!(h.whoami(Some(&token)).await["isAuthenticated"], false);
}

#[tokio::test]
async fn log_out_without_a_session_still_redirects() {
    let h = Harness::new();
    let response = h.post("/logout", None, json!({})).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

// ============================================================================
// Identity resolution
// ============================================================================

#[tokio::test]
async fn tampered_token_is_anonymous() {
    let h = Harness::new();
    let token = h.sign_up("dogelord", "doge@example.com").await;
    let forged = format!("{}x", token);
    assert_eq!(h.whoami(Some(&forged)).await["isAuthenticated"], false);
}

#[tokio::test]
async fn session_of_a_deleted_user_is_anonymous() {
    let h = Harness::new();
    let token = h.sign_up("dogelord", "doge@example.com").await;
    h.repo.remove_user(kernel::id::UserId::from_raw(1)).await;

    let me = h.whoami(Some(&token)).await;
    assert_eq!(me["isAuthenticated"], false);
    assert_eq!(me["userId"], Value::Null);
}

#[tokio::test]
async fn expired_session_is_anonymous() {
    let h = Harness::new();
    h.sign_up("dogelord", "doge@example.com").await;

    let session_id = Uuid::new_v4();
    let expired = Session::new(
        session_id,
        SessionData::authenticated(kernel::id::UserId::from_raw(1)),
        -1,
    );
    h.repo.save_session(&expired).await.unwrap();
    let token = session_token::sign(&h.config.session_secret, session_id);

    assert_eq!(h.whoami(Some(&token)).await["isAuthenticated"], false);
}

#[tokio::test]
async fn store_outage_fails_the_request() {
    let h = Harness::new();
    let token = h.sign_up("dogelord", "doge@example.com").await;
    h.repo.set_offline(true);

    let response = h.get("/session", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn anonymous_requests_do_not_touch_the_store() {
    let h = Harness::new();
    h.repo.set_offline(true);
    assert_eq!(h.whoami(None).await["isAuthenticated"], false);
}

// ============================================================================
// Gate, CSRF, profile
// ============================================================================

#[tokio::test]
async fn profile_requires_authentication() {
    let h = Harness::new();
    let response = h.get("/profile", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    assert_eq!(response.headers()[AUTH_REQUIRED_HEADER], "true");
    assert!(response.headers().get(ACCESS_DENIED_HEADER).is_none());
}

#[tokio::test]
async fn profile_redirects_to_the_public_page() {
    let h = Harness::new();
    let token = h.sign_up("dogelord", "doge@example.com").await;

    let response = h.get("/profile", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/users/1/profile");

    let response = h.get("/users/1/profile", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "id": 1, "username": "dogelord" }));

    let response = h.get("/users/99/profile", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn form_pages_issue_a_csrf_token() {
    let h = Harness::new();
    let response = h.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    let body = body_json(response).await;
    let token = body["csrfToken"].as_str().unwrap();
    assert!(cookie.starts_with(&format!("csrf_token={token}")));
    assert_eq!(body["auth"]["isAuthenticated"], false);
}

#[tokio::test]
async fn unsafe_requests_without_csrf_are_rejected() {
    let h = Harness::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/logout")
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/logout")
        .header(header::COOKIE, format!("csrf_token={}", h.csrf))
        .header(platform::csrf::CSRF_HEADER, platform::csrf::issue_token(&h.config.session_secret))
        .body(Body::empty())
        .unwrap();
    let response = h.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
