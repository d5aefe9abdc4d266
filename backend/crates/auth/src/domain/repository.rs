//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every method may fail with `AuthError::StoreUnavailable` (or
//! `AuthError::Database`) when the backing store cannot be reached.

use crate::domain::entity::{
    credential::Credential,
    session::Session,
    user::{NewUser, User},
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;
use kernel::id::UserId;
use uuid::Uuid;

/// Credential Store: user identity
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; `AuthError::EmailTaken` if the email is registered
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by login email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Credential Store: password hashes
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    async fn find_credential(&self, user_id: UserId) -> AuthResult<Option<Credential>>;
}

/// Session Store keyed by session id
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Load an unexpired session
    async fn load_session(&self, session_id: Uuid) -> AuthResult<Option<Session>>;

    /// Insert or overwrite a session; returns once durable
    async fn save_session(&self, session: &Session) -> AuthResult<()>;

    /// Delete a session (no-op if absent)
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Purge expired sessions, returning how many were removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Everything the auth HTTP layer needs from one backing store
pub trait AuthRepositories:
    UserRepository + CredentialRepository + SessionRepository + Clone + Send + Sync + 'static
{
}

impl<T> AuthRepositories for T where
    T: UserRepository + CredentialRepository + SessionRepository + Clone + Send + Sync + 'static
{
}
