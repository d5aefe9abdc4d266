//! In-Memory Repository Implementation
//!
//! Mirrors the Postgres schema's cascades. Can be switched offline to
//! exercise store-failure paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kernel::id::{AnswerId, CommentId, QuestionId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{Answer, Comment, Question, QuestionSummary, Stance, VoteTally};
use crate::domain::repository::{
    AnswerRepository, CommentRepository, QuestionRepository, VoteRepository,
};
use crate::domain::value_objects::{AnswerDraft, CommentDraft, QuestionDraft};
use crate::error::{QaError, QaResult};

#[derive(Default)]
struct State {
    questions: BTreeMap<QuestionId, Question>,
    answers: BTreeMap<AnswerId, Answer>,
    comments: BTreeMap<CommentId, Comment>,
    votes: HashMap<(UserId, AnswerId), Stance>,
    last_question_id: i64,
    last_answer_id: i64,
    last_comment_id: i64,
}

impl State {
    fn remove_answer(&mut self, id: AnswerId) -> bool {
        self.comments.retain(|_, c| c.answer_id != id);
        self.votes.retain(|(_, answer_id), _| *answer_id != id);
        self.answers.remove(&id).is_some()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryQaRepository {
    state: Arc<RwLock<State>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryQaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn vote_count(&self) -> usize {
        self.state.read().await.votes.len()
    }

    fn ensure_online(&self) -> QaResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(QaError::StoreUnavailable("in-memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

impl QuestionRepository for InMemoryQaRepository {
    async fn list_recent(&self) -> QaResult<Vec<QuestionSummary>> {
        self.ensure_online()?;
        let state = self.state.read().await;

        let mut summaries: Vec<QuestionSummary> = state
            .questions
            .values()
            .map(|q| QuestionSummary {
                question: q.clone(),
                answer_count: state
                    .answers
                    .values()
                    .filter(|a| a.question_id == q.id)
                    .count() as u64,
            })
            .collect();
        summaries.sort_by(|a, b| {
            (b.question.created_at, b.question.id).cmp(&(a.question.created_at, a.question.id))
        });

        Ok(summaries)
    }

    async fn find_question(&self, id: QuestionId) -> QaResult<Option<Question>> {
        self.ensure_online()?;
        Ok(self.state.read().await.questions.get(&id).cloned())
    }

    async fn create_question(&self, user_id: UserId, draft: &QuestionDraft) -> QaResult<Question> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        state.last_question_id += 1;

        let now = Utc::now();
        let question = Question {
            id: QuestionId::from_raw(state.last_question_id),
            user_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> QaResult<Option<Question>> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        Ok(state.questions.get_mut(&id).map(|question| {
            question.title = draft.title.clone();
            question.description = draft.description.clone();
            question.updated_at = Utc::now();
            question.clone()
        }))
    }

    async fn delete_question(&self, id: QuestionId) -> QaResult<bool> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        let answer_ids: Vec<AnswerId> = state
            .answers
            .values()
            .filter(|a| a.question_id == id)
            .map(|a| a.id)
            .collect();
        for answer_id in answer_ids {
            state.remove_answer(answer_id);
        }
        Ok(state.questions.remove(&id).is_some())
    }
}

impl AnswerRepository for InMemoryQaRepository {
    async fn list_answers(&self, question_id: QuestionId) -> QaResult<Vec<Answer>> {
        self.ensure_online()?;
        Ok(self
            .state
            .read()
            .await
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn find_answer(&self, id: AnswerId) -> QaResult<Option<Answer>> {
        self.ensure_online()?;
        Ok(self.state.read().await.answers.get(&id).cloned())
    }

    async fn create_answer(
        &self,
        question_id: QuestionId,
        user_id: UserId,
        draft: &AnswerDraft,
    ) -> QaResult<Answer> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        if !state.questions.contains_key(&question_id) {
            return Err(QaError::QuestionNotFound);
        }
        state.last_answer_id += 1;

        let now = Utc::now();
        let answer = Answer {
            id: AnswerId::from_raw(state.last_answer_id),
            question_id,
            user_id,
            title: draft.title.clone(),
            meme_url: draft.meme_url.clone(),
            created_at: now,
            updated_at: now,
        };
        state.answers.insert(answer.id, answer.clone());
        Ok(answer)
    }

    async fn delete_answer(&self, id: AnswerId) -> QaResult<bool> {
        self.ensure_online()?;
        Ok(self.state.write().await.remove_answer(id))
    }
}

impl CommentRepository for InMemoryQaRepository {
    async fn list_comments_for_question(&self, question_id: QuestionId) -> QaResult<Vec<Comment>> {
        self.ensure_online()?;
        let state = self.state.read().await;
        Ok(state
            .comments
            .values()
            .filter(|c| {
                state
                    .answers
                    .get(&c.answer_id)
                    .is_some_and(|a| a.question_id == question_id)
            })
            .cloned()
            .collect())
    }

    async fn find_comment(&self, id: CommentId) -> QaResult<Option<Comment>> {
        self.ensure_online()?;
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn create_comment(
        &self,
        answer_id: AnswerId,
        user_id: UserId,
        draft: &CommentDraft,
    ) -> QaResult<Comment> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        if !state.answers.contains_key(&answer_id) {
            return Err(QaError::AnswerNotFound);
        }
        state.last_comment_id += 1;

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::from_raw(state.last_comment_id),
            answer_id,
            user_id,
            body: draft.body.clone(),
            created_at: now,
            updated_at: now,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, id: CommentId) -> QaResult<bool> {
        self.ensure_online()?;
        Ok(self.state.write().await.comments.remove(&id).is_some())
    }
}

impl VoteRepository for InMemoryQaRepository {
    async fn tally(&self, answer_id: AnswerId) -> QaResult<VoteTally> {
        self.ensure_online()?;
        let state = self.state.read().await;
        Ok(state
            .votes
            .iter()
            .filter(|((_, id), _)| *id == answer_id)
            .fold(VoteTally::default(), |mut tally, (_, stance)| {
                match stance {
                    Stance::Up => tally.upvotes += 1,
                    Stance::Down => tally.downvotes += 1,
                }
                tally
            }))
    }

    async fn stance_of(&self, user_id: UserId, answer_id: AnswerId) -> QaResult<Option<Stance>> {
        self.ensure_online()?;
        Ok(self
            .state
            .read()
            .await
            .votes
            .get(&(user_id, answer_id))
            .copied())
    }

    async fn cast_vote(
        &self,
        user_id: UserId,
        answer_id: AnswerId,
        stance: Stance,
    ) -> QaResult<()> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        if !state.answers.contains_key(&answer_id) {
            return Err(QaError::AnswerNotFound);
        }
        state.votes.insert((user_id, answer_id), stance);
        Ok(())
    }

    async fn retract_vote(&self, user_id: UserId, answer_id: AnswerId) -> QaResult<bool> {
        self.ensure_online()?;
        Ok(self
            .state
            .write()
            .await
            .votes
            .remove(&(user_id, answer_id))
            .is_some())
    }
}
