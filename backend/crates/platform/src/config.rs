//! Environment Configuration Helpers
//!
//! Small parsers shared by the binary when turning environment variables
//! into typed configuration.

use base64::{Engine, engine::general_purpose};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not valid base64")]
    InvalidBase64 { key: String },

    #[error("{key} must decode to 32 bytes (got {actual})")]
    WrongSecretLength { key: String, actual: usize },

    #[error("{key} must be a boolean (got {value:?})")]
    InvalidFlag { key: String, value: String },
}

/// Read a variable, falling back to `default` when unset
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read a boolean variable (`true/false/1/0/yes/no`)
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Ok(value) => parse_flag(key, &value),
        Err(_) => Ok(default),
    }
}

/// Read a base64-encoded 32-byte secret, `None` when unset
pub fn secret_from_env(key: &str) -> Result<Option<[u8; 32]>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => decode_secret(key, &value).map(Some),
        Err(_) => Ok(None),
    }
}

pub fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

pub fn decode_secret(key: &str, value: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = general_purpose::STANDARD
        .decode(value.trim())
        .map_err(|_| ConfigError::InvalidBase64 {
            key: key.to_string(),
        })?;

    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ConfigError::WrongSecretLength {
            key: key.to_string(),
            actual: bytes.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_secret() {
        let encoded = general_purpose::STANDARD.encode([9u8; 32]);
        assert_eq!(decode_secret("SESSION_SECRET", &encoded), Ok([9u8; 32]));
    }

    #[test]
    fn test_decode_secret_wrong_length() {
        let encoded = general_purpose::STANDARD.encode([9u8; 16]);
        assert_eq!(
            decode_secret("SESSION_SECRET", &encoded),
            Err(ConfigError::WrongSecretLength {
                key: "SESSION_SECRET".to_string(),
                actual: 16
            })
        );
        assert!(matches!(
            decode_secret("SESSION_SECRET", "***"),
            Err(ConfigError::InvalidBase64 { .. })
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("COOKIE_SECURE", "true"), Ok(true));
        assert_eq!(parse_flag("COOKIE_SECURE", " 0 "), Ok(false));
        assert!(parse_flag("COOKIE_SECURE", "maybe").is_err());
    }
}
