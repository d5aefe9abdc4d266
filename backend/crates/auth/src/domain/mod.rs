//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the pure
//! request-level policy pieces (auth context, gate, ownership check).

pub mod auth_context;
pub mod authorization;
pub mod entity;
pub mod gate;
pub mod repository;
pub mod value_object;

// Re-exports
pub use auth_context::AuthContext;
pub use entity::{credential::Credential, session::Session, user::User};
pub use repository::{AuthRepositories, CredentialRepository, SessionRepository, UserRepository};
