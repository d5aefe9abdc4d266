//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod csrf;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod redirect;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{require_authenticated, require_csrf, resolve_identity};
pub use router::{auth_router, auth_router_generic, install_request_guards};
