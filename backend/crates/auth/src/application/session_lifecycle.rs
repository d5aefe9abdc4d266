//! Session Lifecycle
//!
//! Binds a user to a session (login) and removes the binding (logout).
//! Both await the store before returning, so a redirect built afterwards
//! never races the write.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::{config::AuthConfig, session_token};
use crate::domain::entity::{
    session::{Session, SessionData},
    user::User,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

pub struct SessionLifecycle<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SessionLifecycle<U, S>
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

    /// Bind `user` to the caller's session and return the cookie value.
    ///
    /// A validly signed incoming token keeps its session id (the record is
    /// overwritten, last write wins); otherwise a fresh id is minted.
    pub async fn login(&self, current_token: Option<&str>, user: &User) -> AuthResult<String> {
        let session_id = current_token
            .and_then(|t| session_token::verify(&self.config.session_secret, t))
            .unwrap_or_else(Uuid::new_v4);

        let session = Session::new(
            session_id,
            SessionData::authenticated(user.user_id),
            self.config.session_ttl_ms(),
        );
        self.session_repo.save_session(&session).await?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(session_token::sign(&self.config.session_secret, session_id))
    }

    /// Remove the caller's session. Idempotent.
    pub async fn logout(&self, current_token: Option<&str>) -> AuthResult<()> {
        let Some(session_id) =
            current_token.and_then(|t| session_token::verify(&self.config.session_secret, t))
        else {
            return Ok(());
        };

        self.session_repo.delete_session(session_id).await?;
        tracing::info!(session_id = %session_id, "User logged out");
        Ok(())
    }

    /// Log into the configured demo account
    pub async fn demo_login(&self, current_token: Option<&str>) -> AuthResult<(User, String)> {
        let email = Email::for_lookup(&self.config.demo_email);
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %user.user_id, "Demo login");
        let token = self.login(current_token, &user).await?;
        Ok((user, token))
    }
}
