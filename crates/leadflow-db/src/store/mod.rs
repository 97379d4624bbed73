//! SurrealDB implementations of the `leadflow-core` store traits.

mod agent;
mod comment;
mod lead;

pub use agent::SurrealAgentStore;
pub use comment::SurrealCommentStore;
pub use lead::SurrealLeadStore;

use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Row struct for `GROUP BY group_key` queries.
#[derive(Debug, SurrealValue)]
struct GroupRow {
    group_key: Option<String>,
    total: u64,
}

fn parse_uuid(entity: &str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::decode(entity, format!("invalid UUID {raw}: {e}")))
}
