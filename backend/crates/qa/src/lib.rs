//! Q&A Backend Module
//!
//! Questions, meme answers, comments and answer votes.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, validated drafts, repository traits
//! - `application/` - Use cases and the vote aggregator
//! - `infra/` - Postgres and in-memory stores
//! - `presentation/` - HTTP handlers
//!
//! Identity comes from the `auth` crate: every handler reads the
//! `AuthContext` placed by `auth::install_request_guards`, mutations sit
//! behind the request gate, and ownership is decided by
//! `auth::authorize`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::QaRepositories;
pub use error::{QaError, QaResult};
pub use infra::memory::InMemoryQaRepository;
pub use infra::postgres::PgQaRepository;
pub use presentation::router::{qa_router, qa_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
