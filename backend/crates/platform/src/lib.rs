//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Signed tokens (HMAC-SHA256, Base64url)
//! - Password hashing (Argon2id) and the sign-up password policy
//! - Cookie management
//! - CSRF double-submit tokens
//! - Environment configuration helpers

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod csrf;
pub mod password;
