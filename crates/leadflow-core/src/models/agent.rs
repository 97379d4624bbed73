//! Sales agent domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person eligible to be assigned to leads and to author comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SalesAgent {
    pub id: Uuid,
    pub name: String,
    /// Intended unique per agent; enforced by the storage layer.
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl SalesAgent {
    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Caller-supplied agent fields, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentFields {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Validated input handed to the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSalesAgent {
    pub name: String,
    pub email: String,
}

/// Resolved agent reference attached to lead read shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSummary {
    pub id: Uuid,
    pub name: String,
}
