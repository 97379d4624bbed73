//! Database-specific error types and conversions.

use leadflow_core::error::LeadflowError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed {entity} row: {reason}")]
    Decode { entity: String, reason: String },

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl DbError {
    pub(crate) fn decode(entity: &str, reason: impl ToString) -> Self {
        DbError::Decode {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<DbError> for LeadflowError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => LeadflowError::NotFound { entity, id },
            other => LeadflowError::Storage(Box::new(other)),
        }
    }
}
