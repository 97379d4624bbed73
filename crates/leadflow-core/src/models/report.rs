//! Report result types computed over the lead population.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lead that reached the closed status inside a reporting window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClosedLead {
    pub lead_id: Uuid,
    pub name: String,
    /// Primary agent's name, or the configured unknown label.
    pub agent_name: String,
    pub closed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PipelineSummary {
    pub open_count: u64,
    pub closed_count: u64,
}

impl PipelineSummary {
    pub fn total(&self) -> u64 {
        self.open_count + self.closed_count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentClosures {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Raw grouped count as produced by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

/// Parallel label/count arrays, the shape dashboard charts consume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl FromIterator<(String, u64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let (labels, counts) = iter.into_iter().unzip();
        Self { labels, counts }
    }
}

impl From<&[AgentClosures]> for ChartSeries {
    fn from(rows: &[AgentClosures]) -> Self {
        rows.iter()
            .map(|r| (r.agent_name.clone(), r.count))
            .collect()
    }
}

impl From<&[StatusCount]> for ChartSeries {
    fn from(rows: &[StatusCount]) -> Self {
        rows.iter().map(|r| (r.status.clone(), r.count)).collect()
    }
}
