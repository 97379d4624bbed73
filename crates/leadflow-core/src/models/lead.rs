//! Lead domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::agent::AgentSummary;

/// The only status value with special meaning: a lead in this state has
/// left the pipeline.
pub const CLOSED_STATUS: &str = "Closed";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPriority(pub String);

impl fmt::Display for UnknownPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown priority: {}", self.0)
    }
}

impl std::error::Error for UnknownPriority {}

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

/// A prospective sales opportunity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub source: String,
    /// Assigned agents in order; the first entry is the primary agent.
    pub sales_agent: Vec<Uuid>,
    /// Open string domain; only [`CLOSED_STATUS`] is interpreted.
    pub status: String,
    pub tags: Vec<String>,
    /// Estimated days to close.
    pub time_to_close: u32,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn primary_agent(&self) -> Option<Uuid> {
        self.sales_agent.first().copied()
    }

    pub fn is_closed(&self) -> bool {
        self.status == CLOSED_STATUS
    }
}

/// Caller-supplied lead fields, not yet validated. Used for both create
/// and full-record update.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadFields {
    pub name: Option<String>,
    pub source: Option<String>,
    pub sales_agent: Option<Vec<String>>,
    pub status: Option<String>,
    pub tags: Option<Vec<String>>,
    pub time_to_close: Option<u32>,
    pub priority: Option<String>,
}

/// The seven business fields after validation. Passed to the storage
/// layer for inserts and full replacements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub source: String,
    pub sales_agent: Vec<Uuid>,
    pub status: String,
    pub tags: Vec<String>,
    pub time_to_close: u32,
    pub priority: Priority,
}

/// A lead with its agent references resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadWithAgents {
    pub lead: Lead,
    pub agents: Vec<AgentSummary>,
}

/// Result of a successful update: the stored lead plus its primary
/// agent resolved to a name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatedLead {
    pub lead: Lead,
    pub primary_agent: Option<AgentSummary>,
}

/// Status predicate for lead counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    Is(String),
    IsNot(String),
}

impl StatusFilter {
    pub fn closed() -> Self {
        StatusFilter::Is(CLOSED_STATUS.into())
    }

    pub fn open() -> Self {
        StatusFilter::IsNot(CLOSED_STATUS.into())
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::Is(s) => s == status,
            StatusFilter::IsNot(s) => s != status,
        }
    }
}
