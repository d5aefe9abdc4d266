//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random URL-safe token carrying `len` bytes of entropy
pub fn random_token(len: usize) -> String {
    to_base64url(&random_bytes(len))
}

pub fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(s)
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Constant-time HMAC-SHA256 verification
pub fn verify_hmac_sha256(key: &[u8], data: &[u8], signature: &[u8]) -> bool {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.verify_slice(signature).is_ok()
}

/// Produce `<value>.<base64url(hmac(value))>`
///
/// `value` must not contain `.`.
pub fn sign_value(key: &[u8], value: &str) -> String {
    let signature = hmac_sha256(key, value.as_bytes());
    format!("{}.{}", value, to_base64url(&signature))
}

/// Return the value part of a signed token if its signature verifies
pub fn verify_signed_value<'a>(key: &[u8], token: &'a str) -> Option<&'a str> {
    let (value, signature_b64) = token.split_once('.')?;
    if value.is_empty() || signature_b64.contains('.') {
        return None;
    }

    let signature = from_base64url(signature_b64).ok()?;
    verify_hmac_sha256(key, value.as_bytes(), &signature).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_rfc4231_case_2() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        assert_eq!(mac.to_vec(), expected);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert_ne!(random_token(16), random_token(16));
    }

    #[test]
    fn test_signed_value_verifies_with_same_key() {
        let key = [7u8; 32];
        let token = sign_value(&key, "c0ffee");
        assert_eq!(verify_signed_value(&key, &token), Some("c0ffee"));
    }

    #[test]
    fn test_signed_value_rejects_tampering() {
        let key = [7u8; 32];
        let token = sign_value(&key, "c0ffee");

        assert_eq!(verify_signed_value(&[8u8; 32], &token), None);

        let (_, sig) = token.split_once('.').unwrap();
        assert_eq!(verify_signed_value(&key, &format!("deadbeef.{sig}")), None);
        assert_eq!(verify_signed_value(&key, "c0ffee"), None);
        assert_eq!(verify_signed_value(&key, "c0ffee.!!!"), None);
        assert_eq!(verify_signed_value(&key, &format!(".{sig}")), None);
    }
}
