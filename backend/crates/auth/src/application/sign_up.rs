//! Sign Up Use Case
//!
//! Creates a new user account. Every failing field is reported, one
//! message per field, in form order.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

const DEMO_USER_NAME: &str = "Demo User";

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let mut errors = Vec::new();

        let user_name = UserName::new(&input.user_name)
            .map_err(|e| errors.push(e.message().to_string()))
            .ok();

        let email = match Email::new(input.email.as_str()) {
            Ok(email) => {
                if self.user_repo.exists_by_email(&email).await? {
                    errors.push(AuthError::EmailTaken.to_string());
                    None
                } else {
                    Some(email)
                }
            }
            Err(e) => {
                errors.push(e.message().to_string());
                None
            }
        };

        let password_matches = input.confirm_password == input.password;
        let password = RawPassword::new(input.password)
            .map_err(|e| errors.push(e.message().to_string()))
            .ok();

        if input.confirm_password.is_empty() {
            errors.push("Please provide a value for Confirm Password".to_string());
        } else if !password_matches {
            errors.push("Confirm Password does not match Password".to_string());
        }

        let (Some(user_name), Some(email), Some(password), true) =
            (user_name, email, password, errors.is_empty())
        else {
            return Err(AuthError::Validation(errors));
        };

        let password_hash = UserPassword::from_raw(&password, self.config.pepper())?;
        let user = self
            .user_repo
            .create(&NewUser {
                user_name,
                email,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent sign up for the same address
                AuthError::EmailTaken => AuthError::Validation(vec![e.to_string()]),
                other => other,
            })?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(user)
    }

    /// Make sure the demo account exists, creating it with an unguessable
    /// password if needed.
    pub async fn ensure_demo_account(&self) -> AuthResult<User> {
        let email = Email::new(self.config.demo_email.as_str())?;
        if let Some(user) = self.user_repo.find_by_email(&email).await? {
            return Ok(user);
        }

        let password = RawPassword::for_login(platform::crypto::random_token(24));
        let new_user = NewUser {
            user_name: UserName::new(DEMO_USER_NAME)?,
            email,
            password_hash: UserPassword::from_raw(&password, self.config.pepper())?,
        };

        match self.user_repo.create(&new_user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.user_id, "Demo account created");
                Ok(user)
            }
            // Another instance created it first
            Err(AuthError::EmailTaken) => self
                .user_repo
                .find_by_email(&new_user.email)
                .await?
                .ok_or(AuthError::UserNotFound),
            Err(e) => Err(e),
        }
    }
}
