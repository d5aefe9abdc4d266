//! Question Use Cases
//!
//! Listing, viewing, and owner-only editing of questions.

use std::collections::HashMap;
use std::sync::Arc;

use auth::{AuthContext, Authorized, decorate, decorate_all};
use kernel::id::{AnswerId, QuestionId};
use serde::Serialize;

use crate::application::vote_aggregator::VoteAggregator;
use crate::application::{acting_user, ensure_owner};
use crate::domain::entities::{Answer, Comment, Question, QuestionSummary, VoteSummary};
use crate::domain::repository::{
    AnswerRepository, CommentRepository, QuestionRepository, VoteRepository,
};
use crate::domain::value_objects::QuestionDraft;
use crate::error::{QaError, QaResult};

/// One answer on the question page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    #[serde(flatten)]
    pub answer: Authorized<Answer>,
    #[serde(flatten)]
    pub votes: VoteSummary,
    pub comments: Vec<Authorized<Comment>>,
}

/// The question page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question: Authorized<Question>,
    pub answers: Vec<AnswerView>,
}

pub struct QuestionUseCase<R>
where
    R: QuestionRepository + AnswerRepository + CommentRepository + VoteRepository + Send + Sync,
{
    repo: Arc<R>,
}

impl<R> QuestionUseCase<R>
where
    R: QuestionRepository + AnswerRepository + CommentRepository + VoteRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Home page: every question, newest first
    pub async fn list(&self, ctx: &AuthContext) -> QaResult<Vec<Authorized<QuestionSummary>>> {
        let questions = self.repo.list_recent().await?;
        Ok(decorate_all(ctx, questions))
    }

    /// Question page with answers, comments and vote state
    pub async fn view(&self, ctx: &AuthContext, id: QuestionId) -> QaResult<QuestionView> {
        let question = self.find(id).await?;

        let (answers, comments) = tokio::try_join!(
            self.repo.list_answers(id),
            self.repo.list_comments_for_question(id)
        )?;

        let answer_ids: Vec<AnswerId> = answers.iter().map(|a| a.id).collect();
        let votes = VoteAggregator::new(self.repo.clone())
            .summarize(ctx, &answer_ids)
            .await?;

        let mut comments_by_answer: HashMap<AnswerId, Vec<Comment>> = HashMap::new();
        for comment in comments {
            comments_by_answer
                .entry(comment.answer_id)
                .or_default()
                .push(comment);
        }

        let answers = answers
            .into_iter()
            .zip(votes)
            .map(|(answer, votes)| AnswerView {
                comments: decorate_all(
                    ctx,
                    comments_by_answer.remove(&answer.id).unwrap_or_default(),
                ),
                answer: decorate(ctx, answer),
                votes,
            })
            .collect();

        Ok(QuestionView {
            question: decorate(ctx, question),
            answers,
        })
    }

    pub async fn create(&self, ctx: &AuthContext, draft: QuestionDraft) -> QaResult<Question> {
        let user_id = acting_user(ctx)?;
        let question = self.repo.create_question(user_id, &draft).await?;
        tracing::info!(question_id = %question.id, user_id = %user_id, "Question created");
        Ok(question)
    }

    /// Load a question the caller may modify: missing ⇒ 404, not owned ⇒
    /// forbidden
    pub async fn load_owned(&self, ctx: &AuthContext, id: QuestionId) -> QaResult<Question> {
        acting_user(ctx)?;
        let question = self.find(id).await?;
        ensure_owner(ctx, &question)?;
        Ok(question)
    }

    pub async fn update(
        &self,
        ctx: &AuthContext,
        id: QuestionId,
        draft: QuestionDraft,
    ) -> QaResult<Question> {
        self.load_owned(ctx, id).await?;
        let question = self
            .repo
            .update_question(id, &draft)
            .await?
            .ok_or(QaError::QuestionNotFound)?;
        tracing::info!(question_id = %id, "Question updated");
        Ok(question)
    }

    pub async fn delete(&self, ctx: &AuthContext, id: QuestionId) -> QaResult<()> {
        self.load_owned(ctx, id).await?;
        self.repo.delete_question(id).await?;
        tracing::info!(question_id = %id, "Question deleted");
        Ok(())
    }

    async fn find(&self, id: QuestionId) -> QaResult<Question> {
        self.repo
            .find_question(id)
            .await?
            .ok_or(QaError::QuestionNotFound)
    }
}
