//! User Name Value Object
//!
//! Display handle chosen at sign up. NFKC-normalized and trimmed; must be
//! non-empty, at most 30 characters, and free of control characters.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Maximum user name length in characters
pub const USER_NAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AppError::unprocessable("Please provide a value for Username"));
        }

        if trimmed.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AppError::unprocessable(format!(
                "Username must not be more than {} characters long",
                USER_NAME_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::unprocessable(
                "Username must not contain control characters",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_is_trimmed() {
        assert_eq!(UserName::new("  dogelord ").unwrap().as_str(), "dogelord");
    }

    #[test]
    fn test_fullwidth_is_normalized() {
        assert_eq!(UserName::new("ｄｏｇｅ").unwrap().as_str(), "doge");
    }

    #[test]
    fn test_user_name_rules() {
        assert_eq!(
            UserName::new("").unwrap_err().message(),
            "Please provide a value for Username"
        );
        assert!(UserName::new("a".repeat(30)).is_ok());
        assert_eq!(
            UserName::new("a".repeat(31)).unwrap_err().message(),
            "Username must not be more than 30 characters long"
        );
    }
}
