//! Session Token
//!
//! Cookie value format: `<uuid>.<base64url(HMAC-SHA256(secret, uuid))>`.

use platform::crypto::{sign_value, verify_signed_value};
use uuid::Uuid;

/// Sign a session id for the cookie
pub fn sign(secret: &[u8], session_id: Uuid) -> String {
    sign_value(secret, &session_id.to_string())
}

/// Recover the session id from a cookie value.
///
/// `None` for anything that is not a well-formed, correctly signed token.
pub fn verify(secret: &[u8], token: &str) -> Option<Uuid> {
    let value = verify_signed_value(secret, token)?;
    Uuid::parse_str(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_sign_then_verify() {
        let id = Uuid::new_v4();
        let token = sign(SECRET, id);
        assert!(token.starts_with(&id.to_string()));
        assert_eq!(verify(SECRET, &token), Some(id));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = sign(SECRET, Uuid::new_v4());
        assert_eq!(verify(b"another secret", &token), None);
    }

    #[test]
    fn test_tampered_id_is_rejected() {
        let token = sign(SECRET, Uuid::new_v4());
        let (_, sig) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), sig);
        assert_eq!(verify(SECRET, &forged), None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(verify(SECRET, ""), None);
        assert_eq!(verify(SECRET, "not-a-token"), None);
        assert_eq!(verify(SECRET, &sign_value(SECRET, "not-a-uuid")), None);
    }
}
