//! Leadflow Core — domain models, error types and storage traits
//! shared by the database and service crates.

pub mod error;
pub mod id;
pub mod models;
pub mod store;
