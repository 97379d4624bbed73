//! Lead Repository — lead lifecycle and agent-reference integrity.
//!
//! Agent references are checked when a lead is created or replaced,
//! not continuously: deleting an agent later can orphan a reference,
//! and the check-then-write sequence is not atomic with the write.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use leadflow_core::error::{LeadflowError, LeadflowResult};
use leadflow_core::id::parse_id;
use leadflow_core::models::agent::AgentSummary;
use leadflow_core::models::lead::{
    Lead, LeadFields, LeadWithAgents, NewLead, StatusFilter, UpdatedLead,
};
use leadflow_core::models::report::GroupCount;
use leadflow_core::store::{AgentStore, LeadStore};
use tracing::{debug, info};
use uuid::Uuid;

use crate::agent::{self, AgentDirectory};
use crate::validation::check_lead_fields;

pub(crate) const ENTITY: &str = "lead";

#[derive(Clone)]
pub struct LeadRepository<L: LeadStore, A: AgentStore> {
    store: L,
    agents: AgentDirectory<A>,
}

impl<L: LeadStore, A: AgentStore> LeadRepository<L, A> {
    pub fn new(store: L, agents: AgentDirectory<A>) -> Self {
        Self { store, agents }
    }

    /// Create a lead.
    ///
    /// Fails with `Validation` naming the first missing field, then with
    /// `InvalidId` or `Reference` naming the first bad agent entry.
    /// Nothing is persisted on failure.
    pub async fn create(&self, fields: LeadFields) -> LeadflowResult<Lead> {
        let input = self.validate(fields).await?;
        let lead = self.store.insert(input).await?;
        info!(lead_id = %lead.id, status = %lead.status, "Lead created");
        Ok(lead)
    }

    /// Fetch a lead with raw agent identifiers.
    pub async fn get(&self, id: &str) -> LeadflowResult<Lead> {
        let id = parse_id(ENTITY, id)?;
        self.find_existing(id).await
    }

    /// Fetch a lead with its agent references resolved. Agents that no
    /// longer exist are left out of `agents`.
    pub async fn get_with_agents(&self, id: &str) -> LeadflowResult<LeadWithAgents> {
        let id = parse_id(ENTITY, id)?;
        let lead = self.find_existing(id).await?;

        let mut agents = Vec::with_capacity(lead.sales_agent.len());
        for agent_id in &lead.sales_agent {
            if let Some(agent) = self.agents.find(*agent_id).await? {
                agents.push(agent.summary());
            }
        }

        Ok(LeadWithAgents { lead, agents })
    }

    /// All leads with resolved agent summaries. An empty collection is a
    /// valid, empty result.
    pub async fn list(&self) -> LeadflowResult<Vec<LeadWithAgents>> {
        let leads = self.store.find_all().await?;
        let directory: HashMap<Uuid, AgentSummary> = self
            .agents
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id, a.summary()))
            .collect();

        debug!(count = leads.len(), "Listing leads");
        Ok(leads
            .into_iter()
            .map(|lead| {
                let agents = lead
                    .sales_agent
                    .iter()
                    .filter_map(|id| directory.get(id).cloned())
                    .collect();
                LeadWithAgents { lead, agents }
            })
            .collect())
    }

    /// Replace the seven business fields of a lead.
    ///
    /// Applies the same checks as [`create`](Self::create) to the
    /// replacement set, refreshes `updated_at`, and resolves the primary
    /// agent for the response.
    pub async fn update(&self, id: &str, fields: LeadFields) -> LeadflowResult<UpdatedLead> {
        let id = parse_id(ENTITY, id)?;
        let input = self.validate(fields).await?;

        let lead = self
            .store
            .update_by_id(id, input)
            .await?
            .ok_or_else(|| LeadflowError::not_found(ENTITY, id))?;

        let primary_agent = match lead.primary_agent() {
            Some(agent_id) => self.agents.find(agent_id).await?.map(|a| a.summary()),
            None => None,
        };

        info!(lead_id = %id, status = %lead.status, "Lead updated");
        Ok(UpdatedLead {
            lead,
            primary_agent,
        })
    }

    /// Delete a lead and return the removed record. Its comments are not
    /// removed.
    pub async fn delete(&self, id: &str) -> LeadflowResult<Lead> {
        let id = parse_id(ENTITY, id)?;
        let lead = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| LeadflowError::not_found(ENTITY, id))?;
        info!(lead_id = %id, "Lead deleted");
        Ok(lead)
    }

    /// Existence check for an already-parsed identifier.
    pub async fn exists(&self, id: Uuid) -> LeadflowResult<bool> {
        Ok(self.store.find_by_id(id).await?.is_some())
    }

    pub async fn count_by_status(&self, filter: StatusFilter) -> LeadflowResult<u64> {
        self.store.count(filter).await
    }

    pub(crate) async fn closed_since(&self, cutoff: DateTime<Utc>) -> LeadflowResult<Vec<Lead>> {
        self.store.find_closed_since(cutoff).await
    }

    pub(crate) async fn closed_counts_by_primary_agent(&self) -> LeadflowResult<Vec<GroupCount>> {
        self.store.count_closed_by_primary_agent().await
    }

    pub(crate) async fn status_counts(&self) -> LeadflowResult<Vec<GroupCount>> {
        self.store.count_by_status().await
    }

    async fn find_existing(&self, id: Uuid) -> LeadflowResult<Lead> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LeadflowError::not_found(ENTITY, id))
    }

    /// Presence checks first, then each agent entry in order: format,
    /// then existence. Stops at the first failure.
    async fn validate(&self, fields: LeadFields) -> LeadflowResult<NewLead> {
        let checked = check_lead_fields(fields)?;

        let mut sales_agent = Vec::with_capacity(checked.sales_agent.len());
        for raw in &checked.sales_agent {
            let agent_id = parse_id(agent::ENTITY, raw)?;
            if !self.agents.exists(agent_id).await? {
                return Err(LeadflowError::reference(agent::ENTITY, raw));
            }
            if !sales_agent.contains(&agent_id) {
                sales_agent.push(agent_id);
            }
        }

        Ok(NewLead {
            name: checked.name,
            source: checked.source,
            sales_agent,
            status: checked.status,
            tags: checked.tags,
            time_to_close: checked.time_to_close,
            priority: checked.priority,
        })
    }
}
