//! Sign In Use Case
//!
//! Verifies email and password. Unknown email and wrong password produce
//! the same message and both pay for one Argon2 verification.

use std::sync::{Arc, LazyLock};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email address and/or password";

/// Verified against when there is no stored hash to check
static DUMMY_HASH: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    let raw = RawPassword::for_login(platform::crypto::random_token(24));
    UserPassword::from_raw(&raw, None).ok()
});

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in use case
pub struct SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<User> {
        let mut errors = Vec::new();
        if input.email.trim().is_empty() {
            errors.push("Please provide a value for Email Address".to_string());
        }
        if input.password.is_empty() {
            errors.push("Please provide a value for Password".to_string());
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let email = Email::for_lookup(&input.email);
        let password = RawPassword::for_login(input.password);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            verify_dummy(&password, self.config.pepper());
            tracing::warn!(email = %email, "Sign in failed: unknown email");
            return Err(invalid_credentials());
        };

        let verified = match self.credential_repo.find_credential(user.user_id).await? {
            Some(credential) => credential
                .password_hash
                .verify(&password, self.config.pepper()),
            None => verify_dummy(&password, self.config.pepper()),
        };

        if !verified {
            tracing::warn!(user_id = %user.user_id, "Sign in failed: wrong password");
            return Err(invalid_credentials());
        }

        tracing::info!(user_id = %user.user_id, "User signed in");
        Ok(user)
    }
}

fn invalid_credentials() -> AuthError {
    AuthError::Validation(vec![INVALID_CREDENTIALS_MESSAGE.to_string()])
}

/// Spends one verification and always fails
fn verify_dummy(password: &RawPassword, pepper: Option<&[u8]>) -> bool {
    if let Some(hash) = DUMMY_HASH.as_ref() {
        std::hint::black_box(hash.verify(password, pepper));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::user_name::UserName;
    use crate::infra::memory::InMemoryAuthRepository;

    #[test]
    fn test_dummy_hash_is_a_real_argon2_hash() {
        let hash = DUMMY_HASH.as_ref().unwrap();
        assert!(hash.as_phc_string().starts_with("$argon2id$"));
        assert!(!verify_dummy(&RawPassword::for_login("Passw0rd!".into()), None));
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_fail_alike() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let raw = RawPassword::new("Passw0rd!".to_string()).unwrap();
        repo.create(&NewUser {
            user_name: UserName::new("doge").unwrap(),
            email: Email::new("doge@example.com").unwrap(),
            password_hash: UserPassword::from_raw(&raw, None).unwrap(),
        })
        .await
        .unwrap();

        let use_case = SignInUseCase::new(repo.clone(), repo, Arc::new(AuthConfig::development()));
        let attempt = |email: &str, password: &str| SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        };

        let unknown = use_case
            .execute(attempt("nobody@example.com", "Passw0rd!"))
            .await
            .unwrap_err();
        let wrong = use_case
            .execute(attempt("doge@example.com", "Wrong0rd!"))
            .await
            .unwrap_err();
        assert_eq!(unknown.messages(), wrong.messages());
        assert_eq!(unknown.messages(), [INVALID_CREDENTIALS_MESSAGE]);

        assert!(use_case.execute(attempt("doge@example.com", "Passw0rd!")).await.is_ok());
    }
}
