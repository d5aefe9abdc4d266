//! Answer Use Cases

use std::sync::Arc;

use auth::AuthContext;
use kernel::id::{AnswerId, QuestionId};

use crate::application::{acting_user, ensure_owner};
use crate::domain::entities::Answer;
use crate::domain::repository::{AnswerRepository, QuestionRepository};
use crate::domain::value_objects::AnswerDraft;
use crate::error::{QaError, QaResult};

pub struct AnswerUseCase<R>
where
    R: QuestionRepository + AnswerRepository + Send + Sync,
{
    repo: Arc<R>,
}

impl<R> AnswerUseCase<R>
where
    R: QuestionRepository + AnswerRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(
        &self,
        ctx: &AuthContext,
        question_id: QuestionId,
        draft: AnswerDraft,
    ) -> QaResult<Answer> {
        let user_id = acting_user(ctx)?;
        self.repo
            .find_question(question_id)
            .await?
            .ok_or(QaError::QuestionNotFound)?;

        let answer = self.repo.create_answer(question_id, user_id, &draft).await?;
        tracing::info!(
            answer_id = %answer.id,
            question_id = %question_id,
            user_id = %user_id,
            "Answer created"
        );
        Ok(answer)
    }

    /// Owner-only; returns the question the answer belonged to
    pub async fn delete(&self, ctx: &AuthContext, id: AnswerId) -> QaResult<QuestionId> {
        acting_user(ctx)?;
        let answer = self
            .repo
            .find_answer(id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;
        ensure_owner(ctx, &answer)?;

        self.repo.delete_answer(id).await?;
        tracing::info!(answer_id = %id, "Answer deleted");
        Ok(answer.question_id)
    }
}
