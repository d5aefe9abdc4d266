//! Credential Entity
//!
//! Sensitive authentication data for a user, loaded only when verifying a
//! login.

use kernel::id::UserId;

use crate::domain::value_object::user_password::UserPassword;

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: UserPassword,
}
