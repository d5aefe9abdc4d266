//! Infrastructure Layer
//!
//! Database implementations and an in-memory store for tests and local runs.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryQaRepository;
pub use postgres::PgQaRepository;
