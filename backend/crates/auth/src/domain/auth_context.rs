//! Auth Context
//!
//! Per-request, read-only identity snapshot produced by the identity
//! resolver. Either anonymous or carrying the resolved `User`; there is no
//! state in between.

use kernel::id::UserId;
use serde::Serialize;

use crate::domain::entity::user::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.user_id)
    }

    /// Wire view for templates and `GET /session`
    pub fn view(&self) -> AuthContextView {
        AuthContextView {
            is_authenticated: self.is_authenticated(),
            user_id: self.user_id(),
            user_name: self.user.as_ref().map(|u| u.user_name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContextView {
    pub is_authenticated: bool,
    pub user_id: Option<UserId>,
    pub user_name: Option<String>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_name::UserName};
    use chrono::Utc;

    pub(crate) fn user(id: i64) -> User {
        User {
            user_id: UserId::from_raw(id),
            user_name: UserName::from_db(format!("user{id}")),
            email: Email::from_db(format!("user{id}@example.com")),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_anonymous_context() {
        let ctx = AuthContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.user_id(), None);
        assert_eq!(ctx, AuthContext::default());
    }

    #[test]
    fn test_authenticated_context_view() {
        let ctx = AuthContext::authenticated(user(7));
        let view = serde_json::to_value(ctx.view()).unwrap();
        assert_eq!(view["isAuthenticated"], true);
        assert_eq!(view["userId"], 7);
        assert_eq!(view["userName"], "user7");
    }
}
