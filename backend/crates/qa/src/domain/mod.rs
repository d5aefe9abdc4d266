//! Domain Layer
//!
//! Contains entities, validated drafts, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{Answer, Comment, Question, QuestionSummary, Stance, VoteSummary, VoteTally};
pub use repository::{
    AnswerRepository, CommentRepository, QaRepositories, QuestionRepository, VoteRepository,
};
pub use value_objects::{AnswerDraft, CommentDraft, QuestionDraft};
