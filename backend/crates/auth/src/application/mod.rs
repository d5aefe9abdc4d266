//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod resolve_identity;
pub mod session_lifecycle;
pub mod session_token;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use resolve_identity::ResolveIdentityUseCase;
pub use session_lifecycle::SessionLifecycle;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpUseCase};
