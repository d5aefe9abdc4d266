//! In-Memory Repository Implementation
//!
//! Backs the router in tests and in local runs without Postgres. Can be
//! switched offline to exercise store-failure paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{
    credential::Credential,
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{CredentialRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    users: BTreeMap<UserId, (User, UserPassword)>,
    next_user_id: i64,
    sessions: HashMap<Uuid, Session>,
}

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<RwLock<State>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Remove a user while leaving their sessions behind
    pub async fn remove_user(&self, user_id: UserId) {
        self.state.write().await.users.remove(&user_id);
    }

    pub async fn user_count(&self) -> usize {
        self.state.read().await.users.len()
    }

    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.state.read().await.sessions.values().cloned().collect()
    }

    fn ensure_online(&self) -> AuthResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AuthError::StoreUnavailable("in-memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, new_user: &NewUser) -> AuthResult<User> {
        self.ensure_online()?;
        let mut state = self.state.write().await;

        if state.users.values().any(|(u, _)| u.email == new_user.email) {
            return Err(AuthError::EmailTaken);
        }

        state.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            user_id: UserId::from_raw(state.next_user_id),
            user_name: new_user.user_name.clone(),
            email: new_user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        state
            .users
            .insert(user.user_id, (user.clone(), new_user.password_hash.clone()));

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        self.ensure_online()?;
        Ok(self
            .state
            .read()
            .await
            .users
            .get(&user_id)
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.ensure_online()?;
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|(u, _)| &u.email == email)
            .map(|(u, _)| u.clone()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(UserRepository::find_by_email(self, email).await?.is_some())
    }
}

impl CredentialRepository for InMemoryAuthRepository {
    async fn find_credential(&self, user_id: UserId) -> AuthResult<Option<Credential>> {
        self.ensure_online()?;
        Ok(self
            .state
            .read()
            .await
            .users
            .get(&user_id)
            .map(|(_, hash)| Credential {
                user_id,
                password_hash: hash.clone(),
            }))
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn load_session(&self, session_id: Uuid) -> AuthResult<Option<Session>> {
        self.ensure_online()?;
        Ok(self
            .state
            .read()
            .await
            .sessions
            .get(&session_id)
            .filter(|s| !s.is_expired())
            .cloned())
    }

    async fn save_session(&self, session: &Session) -> AuthResult<()> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        let created_at = state
            .sessions
            .get(&session.session_id)
            .map_or(session.created_at, |existing| existing.created_at);
        state.sessions.insert(
            session.session_id,
            Session {
                created_at,
                ..session.clone()
            },
        );
        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.ensure_online()?;
        self.state.write().await.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.ensure_online()?;
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| !s.is_expired());
        Ok((before - state.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::session::SessionData;
    use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};

    fn new_user(email: &str) -> NewUser {
        let raw = RawPassword::new("Passw0rd!".to_string()).unwrap();
        NewUser {
            user_name: UserName::new("tester").unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: UserPassword::from_raw(&raw, None).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_email_unique() {
        let repo = InMemoryAuthRepository::new();
        let a = repo.create(&new_user("a@example.com")).await.unwrap();
        let b = repo.create(&new_user("b@example.com")).await.unwrap();
        assert_eq!(a.user_id.value(), 1);
        assert_eq!(b.user_id.value(), 2);

        let err = repo.create(&new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_invisible_and_purged() {
        let repo = InMemoryAuthRepository::new();
        let expired = Session::new(Uuid::new_v4(), SessionData::anonymous(), -1);
        let live = Session::new(Uuid::new_v4(), SessionData::anonymous(), 60_000);
        repo.save_session(&expired).await.unwrap();
        repo.save_session(&live).await.unwrap();

        assert!(repo.load_session(expired.session_id).await.unwrap().is_none());
        assert!(repo.load_session(live.session_id).await.unwrap().is_some());

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let repo = InMemoryAuthRepository::new();
        repo.set_offline(true);
        let err = repo.load_session(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_store_fault());
        assert!(repo.find_by_id(UserId::from_raw(1)).await.is_err());
    }
}
