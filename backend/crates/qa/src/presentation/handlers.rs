//! HTTP Handlers
//!
//! Every handler receives the caller's `AuthContext`. Gated routes only
//! ever see an authenticated one.

use std::sync::Arc;

use auth::presentation::csrf::CsrfIssue;
use auth::presentation::dto::{FormPageResponse, ValidationFailedResponse};
use auth::{AuthConfig, AuthContext};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use kernel::id::{AnswerId, CommentId, QuestionId};

use crate::application::{AnswerUseCase, CommentUseCase, QuestionUseCase, VoteUseCase};
use crate::domain::entities::{Question, Stance};
use crate::domain::repository::QaRepositories;
use crate::domain::value_objects::{AnswerDraft, CommentDraft, QuestionDraft};
use crate::error::QaResult;
use crate::presentation::dto::{
    AnswerRequest, CommentRequest, HomeResponse, QuestionPageResponse, QuestionRequest,
};

const HOME_TITLE: &str = "Meme Overflow";
const ASK_TITLE: &str = "Ask A Question";
const EDIT_TITLE: &str = "Edit Question";
const DELETE_TITLE: &str = "Delete Question";

/// Shared state for Q&A handlers
#[derive(Clone)]
pub struct QaAppState<R>
where
    R: QaRepositories,
{
    pub repo: Arc<R>,
    /// Needed to issue CSRF tokens on form pages
    pub auth_config: Arc<AuthConfig>,
}

fn question_page(id: QuestionId) -> Redirect {
    Redirect::to(&format!("/questions/{}", id))
}

fn form_page(
    config: &AuthConfig,
    title: &str,
    ctx: &AuthContext,
    question: Option<Question>,
) -> Response {
    let csrf = CsrfIssue::new(config);
    let body = FormPageResponse {
        title: title.to_string(),
        csrf_token: csrf.token.clone(),
        auth: ctx.view(),
        data: question,
    };
    (csrf.header(), Json(body)).into_response()
}

// ============================================================================
// Questions
// ============================================================================

/// GET /
pub async fn home<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
) -> QaResult<Json<HomeResponse>>
where
    R: QaRepositories,
{
    let questions = QuestionUseCase::new(state.repo.clone()).list(&ctx).await?;
    Ok(Json(HomeResponse {
        title: HOME_TITLE.to_string(),
        auth: ctx.view(),
        questions,
    }))
}

/// GET /questions/new (gated)
pub async fn new_question_page<R>(State(state): State<QaAppState<R>>, ctx: AuthContext) -> Response
where
    R: QaRepositories,
{
    form_page(&state.auth_config, ASK_TITLE, &ctx, None)
}

/// POST /questions/new (gated)
pub async fn create_question<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Json(req): Json<QuestionRequest>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let draft = match QuestionDraft::new(&req.title, &req.description) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(ValidationFailedResponse::new(ASK_TITLE, errors, req).into_response());
        }
    };

    QuestionUseCase::new(state.repo.clone())
        .create(&ctx, draft)
        .await?;
    Ok(Redirect::to("/").into_response())
}

/// GET /questions/{id}
pub async fn view_question<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<QuestionId>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let view = QuestionUseCase::new(state.repo.clone())
        .view(&ctx, id)
        .await?;

    let csrf = CsrfIssue::new(&state.auth_config);
    let body = QuestionPageResponse {
        title: view.question.resource().title.clone(),
        auth: ctx.view(),
        csrf_token: csrf.token.clone(),
        view,
    };
    Ok((csrf.header(), Json(body)).into_response())
}

/// GET /questions/{id}/edit (gated, owner only)
pub async fn edit_question_page<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<QuestionId>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let question = QuestionUseCase::new(state.repo.clone())
        .load_owned(&ctx, id)
        .await?;
    Ok(form_page(&state.auth_config, EDIT_TITLE, &ctx, Some(question)))
}

/// POST /questions/{id}/edit (gated, owner only)
pub async fn update_question<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<QuestionId>,
    Json(req): Json<QuestionRequest>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let use_case = QuestionUseCase::new(state.repo.clone());

    let draft = match QuestionDraft::new(&req.title, &req.description) {
        Ok(draft) => draft,
        Err(errors) => {
            // Non-owners learn nothing about validation
            use_case.load_owned(&ctx, id).await?;
            return Ok(ValidationFailedResponse::new(EDIT_TITLE, errors, req).into_response());
        }
    };

    use_case.update(&ctx, id, draft).await?;
    Ok(Redirect::to("/").into_response())
}

/// GET /questions/{id}/delete (gated, owner only)
pub async fn delete_question_page<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<QuestionId>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let question = QuestionUseCase::new(state.repo.clone())
        .load_owned(&ctx, id)
        .await?;
    Ok(form_page(&state.auth_config, DELETE_TITLE, &ctx, Some(question)))
}

/// POST /questions/{id}/delete (gated, owner only)
pub async fn delete_question<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<QuestionId>,
) -> QaResult<Redirect>
where
    R: QaRepositories,
{
    QuestionUseCase::new(state.repo.clone())
        .delete(&ctx, id)
        .await?;
    Ok(Redirect::to("/"))
}

// ============================================================================
// Answers & Comments
// ============================================================================

/// POST /questions/{id} (gated)
pub async fn create_answer<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(question_id): Path<QuestionId>,
    Json(req): Json<AnswerRequest>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let draft = match AnswerDraft::new(&req.title, &req.meme_url) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(ValidationFailedResponse::new("Answer", errors, req).into_response());
        }
    };

    AnswerUseCase::new(state.repo.clone())
        .create(&ctx, question_id, draft)
        .await?;
    Ok(question_page(question_id).into_response())
}

/// POST /answers/{id}/delete (gated, owner only)
pub async fn delete_answer<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<AnswerId>,
) -> QaResult<Redirect>
where
    R: QaRepositories,
{
    let question_id = AnswerUseCase::new(state.repo.clone())
        .delete(&ctx, id)
        .await?;
    Ok(question_page(question_id))
}

/// POST /answers/{id}/comments (gated)
pub async fn create_comment<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(answer_id): Path<AnswerId>,
    Json(req): Json<CommentRequest>,
) -> QaResult<Response>
where
    R: QaRepositories,
{
    let draft = match CommentDraft::new(&req.body) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(ValidationFailedResponse::new("Comment", errors, req).into_response());
        }
    };

    let question_id = CommentUseCase::new(state.repo.clone())
        .create(&ctx, answer_id, draft)
        .await?;
    Ok(question_page(question_id).into_response())
}

/// POST /comments/{id}/delete (gated, owner only)
pub async fn delete_comment<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<CommentId>,
) -> QaResult<Redirect>
where
    R: QaRepositories,
{
    let question_id = CommentUseCase::new(state.repo.clone())
        .delete(&ctx, id)
        .await?;
    Ok(question_page(question_id))
}

// ============================================================================
// Votes
// ============================================================================

/// POST /answers/{id}/upvote (gated)
pub async fn upvote<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<AnswerId>,
) -> QaResult<Redirect>
where
    R: QaRepositories,
{
    let question_id = VoteUseCase::new(state.repo.clone())
        .cast(&ctx, id, Stance::Up)
        .await?;
    Ok(question_page(question_id))
}

/// POST /answers/{id}/downvote (gated)
pub async fn downvote<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<AnswerId>,
) -> QaResult<Redirect>
where
    R: QaRepositories,
{
    let question_id = VoteUseCase::new(state.repo.clone())
        .cast(&ctx, id, Stance::Down)
        .await?;
    Ok(question_page(question_id))
}

/// POST /answers/{id}/unvote (gated)
pub async fn unvote<R>(
    State(state): State<QaAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<AnswerId>,
) -> QaResult<Redirect>
where
    R: QaRepositories,
{
    let question_id = VoteUseCase::new(state.repo.clone())
        .retract(&ctx, id)
        .await?;
    Ok(question_page(question_id))
}
