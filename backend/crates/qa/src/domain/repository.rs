//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Any method may fail with `QaError::StoreUnavailable` or
//! `QaError::Database`.

use kernel::id::{AnswerId, CommentId, QuestionId, UserId};

use crate::domain::entities::{Answer, Comment, Question, QuestionSummary, Stance, VoteTally};
use crate::domain::value_objects::{AnswerDraft, CommentDraft, QuestionDraft};
use crate::error::QaResult;

#[trait_variant::make(QuestionRepository: Send)]
pub trait LocalQuestionRepository {
    /// All questions, newest first, with answer counts
    async fn list_recent(&self) -> QaResult<Vec<QuestionSummary>>;

    async fn find_question(&self, id: QuestionId) -> QaResult<Option<Question>>;

    async fn create_question(&self, user_id: UserId, draft: &QuestionDraft) -> QaResult<Question>;

    /// Overwrite title and description; `None` if the question vanished
    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> QaResult<Option<Question>>;

    /// Delete a question with its answers, comments and votes
    async fn delete_question(&self, id: QuestionId) -> QaResult<bool>;
}

#[trait_variant::make(AnswerRepository: Send)]
pub trait LocalAnswerRepository {
    /// Answers to a question, oldest first
    async fn list_answers(&self, question_id: QuestionId) -> QaResult<Vec<Answer>>;

    async fn find_answer(&self, id: AnswerId) -> QaResult<Option<Answer>>;

    /// `QaError::QuestionNotFound` if the question is gone
    async fn create_answer(
        &self,
        question_id: QuestionId,
        user_id: UserId,
        draft: &AnswerDraft,
    ) -> QaResult<Answer>;

    /// Delete an answer with its comments and votes
    async fn delete_answer(&self, id: AnswerId) -> QaResult<bool>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Comments on every answer of a question, oldest first
    async fn list_comments_for_question(&self, question_id: QuestionId) -> QaResult<Vec<Comment>>;

    async fn find_comment(&self, id: CommentId) -> QaResult<Option<Comment>>;

    /// `QaError::AnswerNotFound` if the answer is gone
    async fn create_comment(
        &self,
        answer_id: AnswerId,
        user_id: UserId,
        draft: &CommentDraft,
    ) -> QaResult<Comment>;

    async fn delete_comment(&self, id: CommentId) -> QaResult<bool>;
}

/// One vote per (user, answer)
#[trait_variant::make(VoteRepository: Send)]
pub trait LocalVoteRepository {
    async fn tally(&self, answer_id: AnswerId) -> QaResult<VoteTally>;

    async fn stance_of(&self, user_id: UserId, answer_id: AnswerId) -> QaResult<Option<Stance>>;

    /// Insert or overwrite the caller's stance.
    /// `QaError::AnswerNotFound` if the answer is gone.
    async fn cast_vote(&self, user_id: UserId, answer_id: AnswerId, stance: Stance)
    -> QaResult<()>;

    /// Remove the caller's vote; false if there was none
    async fn retract_vote(&self, user_id: UserId, answer_id: AnswerId) -> QaResult<bool>;
}

/// Everything the Q&A HTTP layer needs from one backing store
pub trait QaRepositories:
    QuestionRepository
    + AnswerRepository
    + CommentRepository
    + VoteRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> QaRepositories for T where
    T: QuestionRepository
        + AnswerRepository
        + CommentRepository
        + VoteRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
