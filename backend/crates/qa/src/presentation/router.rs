//! Q&A Router

use auth::AuthConfig;
use auth::presentation::middleware::require_authenticated;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::QaRepositories;
use crate::infra::postgres::PgQaRepository;
use crate::presentation::handlers::{self, QaAppState};

/// Create the Q&A router with PostgreSQL repository
pub fn qa_router(repo: PgQaRepository, auth_config: Arc<AuthConfig>) -> Router {
    qa_router_generic(Arc::new(repo), auth_config)
}

/// Create a generic Q&A router for any repository implementation.
///
/// Expects to be wrapped by `auth::install_request_guards`.
pub fn qa_router_generic<R>(repo: Arc<R>, auth_config: Arc<AuthConfig>) -> Router
where
    R: QaRepositories,
{
    let state = QaAppState { repo, auth_config };

    let public: Router<QaAppState<R>> = Router::new()
        .route("/", get(handlers::home::<R>))
        .route("/questions/{id}", get(handlers::view_question::<R>));

    let gated: Router<QaAppState<R>> = Router::new()
        .route(
            "/questions/new",
            get(handlers::new_question_page::<R>).post(handlers::create_question::<R>),
        )
        .route("/questions/{id}", post(handlers::create_answer::<R>))
        .route(
            "/questions/{id}/edit",
            get(handlers::edit_question_page::<R>).post(handlers::update_question::<R>),
        )
        .route(
            "/questions/{id}/delete",
            get(handlers::delete_question_page::<R>).post(handlers::delete_question::<R>),
        )
        .route("/answers/{id}/delete", post(handlers::delete_answer::<R>))
        .route("/answers/{id}/comments", post(handlers::create_comment::<R>))
        .route("/answers/{id}/upvote", post(handlers::upvote::<R>))
        .route("/answers/{id}/downvote", post(handlers::downvote::<R>))
        .route("/answers/{id}/unvote", post(handlers::unvote::<R>))
        .route("/comments/{id}/delete", post(handlers::delete_comment::<R>))
        .route_layer(middleware::from_fn(require_authenticated));

    public.merge(gated).with_state(state)
}
