//! Leadflow Database — SurrealDB connection management and storage
//! engine implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Implementations of the `leadflow-core` store traits ([`store`])

mod connection;
mod error;
mod schema;
pub mod store;

pub use connection::{DbConfig, DbCredentials, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
