//! Error types for the lead management domain.

use thiserror::Error;

/// Boxed cause carried by [`LeadflowError::Storage`].
pub type StorageCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum LeadflowError {
    /// A required field is missing or carries an unusable value.
    #[error("Validation error: '{field}' {message}")]
    Validation { field: String, message: String },

    /// A caller-supplied identifier is not well-formed.
    #[error("Invalid {entity} ID: {id}")]
    InvalidId { entity: String, id: String },

    /// A well-formed identifier inside a record does not resolve.
    #[error("Referenced {entity} with ID '{id}' not found")]
    Reference { entity: String, id: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Storage error: {0}")]
    Storage(#[source] StorageCause),
}

impl LeadflowError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for the "field is required" validation failure.
    pub fn missing(field: &str) -> Self {
        Self::validation(field, "is required")
    }

    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn reference(entity: &str, id: impl ToString) -> Self {
        Self::Reference {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

pub type LeadflowResult<T> = Result<T, LeadflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_the_field() {
        let err = LeadflowError::missing("source");
        assert_eq!(err.to_string(), "Validation error: 'source' is required");
    }

    #[test]
    fn storage_error_keeps_its_cause() {
        use std::error::Error as _;

        let cause = std::io::Error::other("connection reset");
        let err = LeadflowError::Storage(Box::new(cause));
        assert_eq!(err.to_string(), "Storage error: connection reset");
        assert!(err.source().is_some());
    }
}
