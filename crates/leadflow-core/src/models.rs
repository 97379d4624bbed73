//! Domain models for lead management.
//!
//! These are the core types shared across all crates.

pub mod agent;
pub mod comment;
pub mod lead;
pub mod report;
