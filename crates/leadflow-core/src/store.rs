//! Storage Engine trait definitions.
//!
//! One trait per entity collection. All operations are async and are
//! expected to be atomic per single record; cross-record checks are the
//! caller's responsibility. Lookups return `None` for absent records and
//! leave the decision to report "not found" to the caller.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::LeadflowResult;
use crate::models::{
    agent::{NewSalesAgent, SalesAgent},
    comment::{Comment, NewComment},
    lead::{Lead, NewLead, StatusFilter},
    report::GroupCount,
};

// ---------------------------------------------------------------------------
// Sales agents
// ---------------------------------------------------------------------------

pub trait AgentStore: Send + Sync {
    fn insert(&self, input: NewSalesAgent) -> impl Future<Output = LeadflowResult<SalesAgent>> + Send;
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = LeadflowResult<Option<SalesAgent>>> + Send;
    /// All agents, oldest first.
    fn find_all(&self) -> impl Future<Output = LeadflowResult<Vec<SalesAgent>>> + Send;
    /// Returns the record as it was before deletion.
    fn delete_by_id(&self, id: Uuid) -> impl Future<Output = LeadflowResult<Option<SalesAgent>>> + Send;
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

pub trait LeadStore: Send + Sync {
    /// Persist a new lead with `created_at = updated_at = now`.
    fn insert(&self, input: NewLead) -> impl Future<Output = LeadflowResult<Lead>> + Send;
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = LeadflowResult<Option<Lead>>> + Send;
    /// All leads, oldest first.
    fn find_all(&self) -> impl Future<Output = LeadflowResult<Vec<Lead>>> + Send;
    /// Closed leads whose `updated_at` is at or after `cutoff`.
    fn find_closed_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = LeadflowResult<Vec<Lead>>> + Send;
    /// Replace the business fields and refresh `updated_at`.
    fn update_by_id(
        &self,
        id: Uuid,
        input: NewLead,
    ) -> impl Future<Output = LeadflowResult<Option<Lead>>> + Send;
    /// Returns the record as it was before deletion.
    fn delete_by_id(&self, id: Uuid) -> impl Future<Output = LeadflowResult<Option<Lead>>> + Send;
    fn count(&self, filter: StatusFilter) -> impl Future<Output = LeadflowResult<u64>> + Send;
    /// Closed leads grouped by primary agent id. Order is unspecified.
    fn count_closed_by_primary_agent(
        &self,
    ) -> impl Future<Output = LeadflowResult<Vec<GroupCount>>> + Send;
    /// All leads grouped by status value. Order is unspecified.
    fn count_by_status(&self) -> impl Future<Output = LeadflowResult<Vec<GroupCount>>> + Send;
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub trait CommentStore: Send + Sync {
    fn insert(&self, input: NewComment) -> impl Future<Output = LeadflowResult<Comment>> + Send;
    /// Comments for a lead ordered by `created_at` ascending.
    fn find_by_lead(&self, lead_id: Uuid) -> impl Future<Output = LeadflowResult<Vec<Comment>>> + Send;
    /// Remove every comment; returns how many were removed.
    fn delete_all(&self) -> impl Future<Output = LeadflowResult<u64>> + Send;
}
