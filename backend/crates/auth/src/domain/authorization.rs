//! Authorization Evaluator
//!
//! Ownership is the only policy: a caller may mutate a resource iff they
//! are authenticated and own it. Evaluation is pure and never mutates the
//! resource; callers that need the result alongside the data wrap it in
//! `Authorized<T>`.

use kernel::id::UserId;
use serde::Serialize;

use crate::domain::auth_context::AuthContext;

/// Anything with a single owning user
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

impl<T: Owned + ?Sized> Owned for &T {
    fn owner_id(&self) -> UserId {
        (**self).owner_id()
    }
}

/// True iff `ctx` is authenticated and its user owns `resource`
pub fn authorize<R: Owned + ?Sized>(ctx: &AuthContext, resource: &R) -> bool {
    ctx.user_id()
        .is_some_and(|user_id| user_id == resource.owner_id())
}

/// A resource paired with the caller's ownership verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorized<T> {
    #[serde(flatten)]
    resource: T,
    is_authorized: bool,
}

impl<T> Authorized<T> {
    pub fn resource(&self) -> &T {
        &self.resource
    }

    pub fn is_authorized(&self) -> bool {
        self.is_authorized
    }
}

pub fn decorate<T: Owned>(ctx: &AuthContext, resource: T) -> Authorized<T> {
    let is_authorized = authorize(ctx, &resource);
    Authorized {
        resource,
        is_authorized,
    }
}

pub fn decorate_all<T: Owned>(ctx: &AuthContext, resources: Vec<T>) -> Vec<Authorized<T>> {
    resources
        .into_iter()
        .map(|resource| decorate(ctx, resource))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth_context::tests::user;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    struct Post {
        id: i64,
        owner: UserId,
    }

    impl Owned for Post {
        fn owner_id(&self) -> UserId {
            self.owner
        }
    }

    fn post(owner: i64) -> Post {
        Post {
            id: 1,
            owner: UserId::from_raw(owner),
        }
    }

    #[test]
    fn test_owner_is_authorized() {
        let ctx = AuthContext::authenticated(user(5));
        assert!(authorize(&ctx, &post(5)));
    }

    #[test]
    fn test_non_owner_is_not_authorized() {
        let ctx = AuthContext::authenticated(user(2));
        assert!(!authorize(&ctx, &post(5)));
    }

    #[test]
    fn test_anonymous_is_never_authorized() {
        let ctx = AuthContext::anonymous();
        assert!(!authorize(&ctx, &post(1)));
    }

    #[test]
    fn test_decorate_leaves_resource_untouched() {
        let ctx = AuthContext::authenticated(user(5));
        let original = post(5);
        let decorated = decorate(&ctx, original.clone());
        assert!(decorated.is_authorized());
        assert_eq!(decorated.resource(), &original);
    }

    #[test]
    fn test_decorate_all_per_item() {
        let ctx = AuthContext::authenticated(user(5));
        let verdicts: Vec<bool> = decorate_all(&ctx, vec![post(5), post(6)])
            .iter()
            .map(Authorized::is_authorized)
            .collect();
        assert_eq!(verdicts, [true, false]);
    }

    #[test]
    fn test_serialized_form_is_flat() {
        let ctx = AuthContext::authenticated(user(5));
        let json = serde_json::to_value(decorate(&ctx, post(5))).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["owner"], 5);
        assert_eq!(json["isAuthorized"], true);
    }
}
