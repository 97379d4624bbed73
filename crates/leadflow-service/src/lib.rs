//! Leadflow Service — lead lifecycle, agent assignment, comment
//! threads and pipeline reporting.
//!
//! Every component is generic over the `leadflow-core` store traits so
//! the business rules have no dependency on the database crate. Each
//! component owns its store handle; dependencies between components are
//! passed in explicitly at construction.

pub mod agent;
pub mod comment;
pub mod config;
pub mod lead;
pub mod report;
mod validation;

pub use agent::AgentDirectory;
pub use comment::CommentThreadService;
pub use config::ServiceConfig;
pub use lead::LeadRepository;
pub use report::ReportingAggregator;
