//! Password Hashing and Verification
//!
//! - Argon2id hashing (PHC strings, per-password random salt)
//! - Optional application-wide pepper
//! - Zeroization of clear text on drop
//! - The sign-up complexity policy
//!
//! Verification during login deliberately skips the policy so that a rule
//! change never locks out existing accounts.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Upper bound on accepted input, keeps hashing cost bounded
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Characters that satisfy the "special character" rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Please provide a value for Password")]
    Empty,

    #[error("Password must be at most {max} characters")]
    TooLong { max: usize },

    #[error(
        "Password must contain at least 1 lowercase letter, uppercase letter, number, and special character (i.e. \"!@#$%^&*\")"
    )]
    MissingCharacterClass,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a new password, enforcing the sign-up policy
    ///
    /// Unicode is NFKC-normalized first so that visually identical input
    /// hashes identically.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        if normalized.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        if !satisfies_complexity(&normalized) {
            return Err(PasswordPolicyError::MissingCharacterClass);
        }

        Ok(Self(normalized))
    }

    /// Wrap login input for verification only (no policy)
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(OsRng);

        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash (constant time inside argon2)
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut password_bytes = password.peppered(pepper);
        let ok = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        ok
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

/// Lowercase, uppercase, digit and one of [`SPECIAL_CHARACTERS`]
fn satisfies_complexity(password: &str) -> bool {
    password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_requires_every_class() {
        assert!(ClearTextPassword::new("Password1!".to_string()).is_ok());

        for weak in ["password1!", "PASSWORD1!", "Password!!", "Password11"] {
            assert_eq!(
                ClearTextPassword::new(weak.to_string()).unwrap_err(),
                PasswordPolicyError::MissingCharacterClass,
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_policy_empty_and_too_long() {
        assert_eq!(
            ClearTextPassword::new(String::new()).unwrap_err(),
            PasswordPolicyError::Empty
        );

        let long = format!("Aa1!{}", "a".repeat(MAX_PASSWORD_LENGTH));
        assert!(matches!(
            ClearTextPassword::new(long),
            Err(PasswordPolicyError::TooLong { .. })
        ));
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("Meme&Lord42".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        let same = ClearTextPassword::for_verification("Meme&Lord42".to_string());
        let other_case = ClearTextPassword::for_verification("meme&lord42".to_string());
        assert!(hashed.verify(&same, None));
        assert!(!hashed.verify(&other_case, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("Meme&Lord42".to_string()).unwrap();
        let pepper = b"site_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"other")));
    }

    #[test]
    fn test_phc_string_roundtrip_and_rejection() {
        let password = ClearTextPassword::new("Meme&Lord42".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));

        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("hunter2".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter2"));
    }
}
