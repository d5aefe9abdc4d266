//! Application Layer
//!
//! Use cases and application services.

pub mod answers;
pub mod comments;
pub mod questions;
pub mod vote_aggregator;
pub mod votes;

// Re-exports
pub use answers::AnswerUseCase;
pub use comments::CommentUseCase;
pub use questions::{AnswerView, QuestionUseCase, QuestionView};
pub use vote_aggregator::VoteAggregator;
pub use votes::VoteUseCase;

use auth::{AuthContext, Owned, authorize};
use kernel::id::UserId;

use crate::error::{QaError, QaResult};

/// Caller identity for a mutation; the gate normally guarantees one
pub(crate) fn acting_user(ctx: &AuthContext) -> QaResult<UserId> {
    ctx.user_id().ok_or(QaError::Unauthenticated)
}

/// Ownership check for a loaded resource
pub(crate) fn ensure_owner<T: Owned>(ctx: &AuthContext, resource: &T) -> QaResult<()> {
    if authorize(ctx, resource) {
        Ok(())
    } else {
        tracing::warn!(
            user_id = ?ctx.user_id(),
            owner_id = %resource.owner_id(),
            "Ownership check failed"
        );
        Err(QaError::Forbidden)
    }
}
