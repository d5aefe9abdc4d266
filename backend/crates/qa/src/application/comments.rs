//! Comment Use Cases

use std::sync::Arc;

use auth::AuthContext;
use kernel::id::{AnswerId, CommentId, QuestionId};

use crate::application::{acting_user, ensure_owner};
use crate::domain::repository::{AnswerRepository, CommentRepository};
use crate::domain::value_objects::CommentDraft;
use crate::error::{QaError, QaResult};

pub struct CommentUseCase<R>
where
    R: AnswerRepository + CommentRepository + Send + Sync,
{
    repo: Arc<R>,
}

impl<R> CommentUseCase<R>
where
    R: AnswerRepository + CommentRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the question page to go back to
    pub async fn create(
        &self,
        ctx: &AuthContext,
        answer_id: AnswerId,
        draft: CommentDraft,
    ) -> QaResult<QuestionId> {
        let user_id = acting_user(ctx)?;
        let answer = self
            .repo
            .find_answer(answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        let comment = self.repo.create_comment(answer_id, user_id, &draft).await?;
        tracing::info!(comment_id = %comment.id, answer_id = %answer_id, "Comment created");
        Ok(answer.question_id)
    }

    pub async fn delete(&self, ctx: &AuthContext, id: CommentId) -> QaResult<QuestionId> {
        acting_user(ctx)?;
        let comment = self
            .repo
            .find_comment(id)
            .await?
            .ok_or(QaError::CommentNotFound)?;
        ensure_owner(ctx, &comment)?;

        let answer = self
            .repo
            .find_answer(comment.answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        self.repo.delete_comment(id).await?;
        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(answer.question_id)
    }
}
