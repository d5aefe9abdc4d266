//! API DTOs (Data Transfer Objects)

use auth::Authorized;
use auth::domain::auth_context::AuthContextView;
use serde::{Deserialize, Serialize};

use crate::application::QuestionView;
use crate::domain::entities::QuestionSummary;

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    pub title: String,
    pub auth: AuthContextView,
    pub questions: Vec<Authorized<QuestionSummary>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPageResponse {
    pub title: String,
    pub auth: AuthContextView,
    pub csrf_token: String,
    #[serde(flatten)]
    pub view: QuestionView,
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct QuestionRequest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerRequest {
    pub title: String,
    pub meme_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CommentRequest {
    pub body: String,
}
