//! Vote Use Cases
//!
//! Casting is idempotent and switches stance in place; a user never holds
//! both an upvote and a downvote on the same answer.

use std::sync::Arc;

use auth::AuthContext;
use kernel::id::{AnswerId, QuestionId};

use crate::application::acting_user;
use crate::domain::entities::Stance;
use crate::domain::repository::{AnswerRepository, VoteRepository};
use crate::error::{QaError, QaResult};

pub struct VoteUseCase<R>
where
    R: AnswerRepository + VoteRepository + Send + Sync,
{
    repo: Arc<R>,
}

impl<R> VoteUseCase<R>
where
    R: AnswerRepository + VoteRepository + Send + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the question page to go back to
    pub async fn cast(
        &self,
        ctx: &AuthContext,
        answer_id: AnswerId,
        stance: Stance,
    ) -> QaResult<QuestionId> {
        let user_id = acting_user(ctx)?;
        let answer = self
            .repo
            .find_answer(answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        self.repo.cast_vote(user_id, answer_id, stance).await?;
        tracing::info!(answer_id = %answer_id, user_id = %user_id, ?stance, "Vote cast");
        Ok(answer.question_id)
    }

    pub async fn retract(&self, ctx: &AuthContext, answer_id: AnswerId) -> QaResult<QuestionId> {
        let user_id = acting_user(ctx)?;
        let answer = self
            .repo
            .find_answer(answer_id)
            .await?
            .ok_or(QaError::AnswerNotFound)?;

        if self.repo.retract_vote(user_id, answer_id).await? {
            tracing::info!(answer_id = %answer_id, user_id = %user_id, "Vote retracted");
        }
        Ok(answer.question_id)
    }
}
