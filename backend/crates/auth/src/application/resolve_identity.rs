//! Resolve Identity Use Case
//!
//! Turns the session cookie value into an `AuthContext`. Read-only: nothing
//! is written, refreshed, or deleted here.
//!
//! | input                                         | result                 |
//! |-----------------------------------------------|------------------------|
//! | no cookie, bad signature, unknown/expired id  | anonymous              |
//! | session without `user_id`                     | anonymous              |
//! | `user_id` whose user no longer exists         | anonymous              |
//! | `user_id` resolving to a user                 | authenticated          |
//! | store failure on either lookup                | `Err(StoreUnavailable)`|

use std::sync::Arc;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::auth_context::AuthContext;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct ResolveIdentityUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> ResolveIdentityUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<AuthContext> {
        let Some(session_id) =
            session_token.and_then(|t| session_token::verify(&self.config.session_secret, t))
        else {
            return Ok(AuthContext::anonymous());
        };

        let session = self
            .session_repo
            .load_session(session_id)
            .await
            .map_err(into_store_fault)?;

        let Some(user_id) = session.and_then(|s| s.data.user_id) else {
            return Ok(AuthContext::anonymous());
        };

        match self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(into_store_fault)?
        {
            Some(user) => Ok(AuthContext::authenticated(user)),
            None => {
                tracing::debug!(user_id = %user_id, "Session references a missing user");
                Ok(AuthContext::anonymous())
            }
        }
    }
}

fn into_store_fault(err: AuthError) -> AuthError {
    match err {
        AuthError::Database(e) => AuthError::StoreUnavailable(e.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::session::{Session, SessionData};
    use crate::infra::memory::InMemoryAuthRepository;
    use uuid::Uuid;

    fn resolver() -> (
        Arc<InMemoryAuthRepository>,
        Arc<AuthConfig>,
        ResolveIdentityUseCase<InMemoryAuthRepository, InMemoryAuthRepository>,
    ) {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::development());
        let use_case = ResolveIdentityUseCase::new(repo.clone(), repo.clone(), config.clone());
        (repo, config, use_case)
    }

    #[tokio::test]
    async fn test_live_session_without_user_is_anonymous() {
        let (repo, config, use_case) = resolver();
        let session_id = Uuid::new_v4();
        let session = Session::new(session_id, SessionData::anonymous(), config.session_ttl_ms());
        repo.save_session(&session).await.unwrap();

        let token = session_token::sign(&config.session_secret, session_id);
        let ctx = use_case.execute(Some(&token)).await.unwrap();
        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn test_signed_token_for_unknown_session_is_anonymous() {
        let (repo, config, use_case) = resolver();
        let token = session_token::sign(&config.session_secret, Uuid::new_v4());

        let ctx = use_case.execute(Some(&token)).await.unwrap();
        assert!(!ctx.is_authenticated());
        assert_eq!(repo.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_missing_cookie_is_anonymous() {
        let (_, _, use_case) = resolver();
        assert!(!use_case.execute(None).await.unwrap().is_authenticated());
    }
}
