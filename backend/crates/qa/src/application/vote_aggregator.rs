//! Vote Aggregator
//!
//! Computes `(score, userUpvoted, userDownvoted)` for a list of
//! answers. Each answer is summarized independently and concurrently; the
//! output keeps the input order. Any store failure fails the whole call:
//! there are no partial results.

use std::sync::Arc;

use auth::AuthContext;
use futures::future::try_join_all;
use kernel::id::{AnswerId, UserId};

use crate::domain::entities::VoteSummary;
use crate::domain::repository::VoteRepository;
use crate::error::QaResult;

pub struct VoteAggregator<V>
where
    V: VoteRepository + Send + Sync,
{
    vote_repo: Arc<V>,
}

impl<V> VoteAggregator<V>
where
    V: VoteRepository + Send + Sync,
{
    pub fn new(vote_repo: Arc<V>) -> Self {
        Self { vote_repo }
    }

    pub async fn summarize(
        &self,
        ctx: &AuthContext,
        answer_ids: &[AnswerId],
    ) -> QaResult<Vec<VoteSummary>> {
        let viewer = ctx.user_id();
        try_join_all(
            answer_ids
                .iter()
                .map(|&answer_id| self.summarize_one(viewer, answer_id)),
        )
        .await
    }

    async fn summarize_one(
        &self,
        viewer: Option<UserId>,
        answer_id: AnswerId,
    ) -> QaResult<VoteSummary> {
        let repo = &*self.vote_repo;
        match viewer {
            Some(user_id) => {
                let (tally, stance) =
                    tokio::try_join!(repo.tally(answer_id), repo.stance_of(user_id, answer_id))?;
                Ok(VoteSummary::new(answer_id, tally, stance))
            }
            None => Ok(VoteSummary::new(answer_id, repo.tally(answer_id).await?, None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Stance;
    use crate::domain::repository::{AnswerRepository, QuestionRepository};
    use crate::domain::value_objects::{AnswerDraft, QuestionDraft};
    use crate::infra::memory::InMemoryQaRepository;
    use auth::models::{Email, User, UserName};
    use chrono::Utc;

    fn ctx_for(id: i64) -> AuthContext {
        AuthContext::authenticated(User {
            user_id: UserId::from_raw(id),
            user_name: UserName::from_db(format!("user{id}")),
            email: Email::from_db(format!("user{id}@example.com")),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn seeded(answers: usize) -> (Arc<InMemoryQaRepository>, Vec<AnswerId>) {
        let repo = Arc::new(InMemoryQaRepository::new());
        let owner = UserId::from_raw(1);
        let question = repo
            .create_question(owner, &QuestionDraft::new("q", "d").unwrap())
            .await
            .unwrap();
        let mut ids = Vec::new();
        for _ in 0..answers {
            let answer = repo
                .create_answer(question.id, owner, &AnswerDraft::new("a", "u").unwrap())
                .await
                .unwrap();
            ids.push(answer.id);
        }
        (repo, ids)
    }

    #[tokio::test]
    async fn test_no_votes_scores_zero() {
        let (repo, ids) = seeded(1).await;
        let summaries = VoteAggregator::new(repo)
            .summarize(&AuthContext::anonymous(), &ids)
            .await
            .unwrap();
        assert_eq!(summaries[0].score, 0);
    }

    #[tokio::test]
    async fn test_anonymous_sees_score_but_no_stance() {
        let (repo, ids) = seeded(1).await;
        for voter in 1..=3 {
            repo.cast_vote(UserId::from_raw(voter), ids[0], Stance::Up)
                .await
                .unwrap();
        }
        repo.cast_vote(UserId::from_raw(4), ids[0], Stance::Down)
            .await
            .unwrap();

        let summary = VoteAggregator::new(repo)
            .summarize(&AuthContext::anonymous(), &ids)
            .await
            .unwrap()[0];
        assert_eq!(summary.score, 2);
        assert!(!summary.user_upvoted);
        assert!(!summary.user_downvoted);
    }

    #[tokio::test]
    async fn test_viewer_stance_is_per_answer_and_in_order() {
        let (repo, ids) = seeded(3).await;
        let viewer = UserId::from_raw(7);
        repo.cast_vote(viewer, ids[0], Stance::Down).await.unwrap();
        repo.cast_vote(viewer, ids[2], Stance::Up).await.unwrap();

        let summaries = VoteAggregator::new(repo)
            .summarize(&ctx_for(7), &ids)
            .await
            .unwrap();

        let ordered: Vec<AnswerId> = summaries.iter().map(|s| s.answer_id).collect();
        assert_eq!(ordered, ids);
        assert_eq!((summaries[0].score, summaries[0].user_downvoted), (-1, true));
        assert!(!summaries[1].user_upvoted && !summaries[1].user_downvoted);
        assert!(summaries[2].user_upvoted);
    }

    #[tokio::test]
    async fn test_store_failure_fails_the_whole_aggregation() {
        let (repo, ids) = seeded(2).await;
        repo.set_offline(true);
        let err = VoteAggregator::new(repo)
            .summarize(&ctx_for(1), &ids)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::QaError::StoreUnavailable(_)));
    }
}
