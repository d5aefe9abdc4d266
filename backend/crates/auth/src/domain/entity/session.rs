//! Session Entity
//!
//! Server-side session record. The cookie only carries the signed
//! `session_id`; everything else stays here.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Set on login, absent for an anonymous session
    pub user_id: Option<UserId>,
}

impl SessionData {
    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: Uuid,
    pub data: SessionData,
    /// Absolute expiry (Unix milliseconds)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl_ms` from now
    pub fn new(session_id: Uuid, data: SessionData, ttl_ms: i64) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            data,
            expires_at_ms: now.timestamp_millis() + ttl_ms,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms <= now_ms
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_expires_after_ttl() {
        let data = SessionData::authenticated(UserId::from_raw(1));
        let session = Session::new(Uuid::new_v4(), data, 1_000);
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.expires_at_ms));
        assert!(!session.is_expired_at(session.expires_at_ms - 1));
    }

    #[test]
    fn test_anonymous_data_has_no_user() {
        assert_eq!(SessionData::anonymous().user_id, None);
    }
}
