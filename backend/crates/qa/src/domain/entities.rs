//! Domain Entities
//!
//! Every user-authored entity has exactly one owner and implements
//! `auth::Owned`, which is all the authorization evaluator needs.

use auth::Owned;
use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, CommentId, QuestionId, UserId};
use serde::Serialize;

/// A question asked by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Question {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Home page row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    #[serde(flatten)]
    pub question: Question,
    pub answer_count: u64,
}

impl Owned for QuestionSummary {
    fn owner_id(&self) -> UserId {
        self.question.user_id
    }
}

/// A meme posted in reply to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub title: String,
    pub meme_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Answer {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub answer_id: AnswerId,
    pub user_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

// ============================================================================
// Votes
// ============================================================================

/// A user's position on an answer. A user holds at most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Up,
    Down,
}

impl Stance {
    /// Stored representation
    pub fn as_i16(self) -> i16 {
        match self {
            Stance::Up => 1,
            Stance::Down => -1,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(Stance::Up),
            -1 => Some(Stance::Down),
            _ => None,
        }
    }
}

/// Raw vote counts for one answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub upvotes: u64,
    pub downvotes: u64,
}

impl VoteTally {
    /// Upvotes minus downvotes; negative when downvotes dominate
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// Aggregated vote state of one answer as seen by one viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    #[serde(skip)]
    pub answer_id: AnswerId,
    pub score: i64,
    pub user_upvoted: bool,
    pub user_downvoted: bool,
}

impl VoteSummary {
    pub fn new(answer_id: AnswerId, tally: VoteTally, stance: Option<Stance>) -> Self {
        Self {
            answer_id,
            score: tally.score(),
            user_upvoted: stance == Some(Stance::Up),
            user_downvoted: stance == Some(Stance::Down),
        }
    }
}
