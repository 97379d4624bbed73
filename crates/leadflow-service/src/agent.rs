//! Agent Directory — owns sales agent records.

use std::collections::{HashMap, HashSet};

use leadflow_core::error::{LeadflowError, LeadflowResult};
use leadflow_core::id::parse_id;
use leadflow_core::models::agent::{AgentFields, SalesAgent};
use leadflow_core::store::AgentStore;
use tracing::{debug, info};
use uuid::Uuid;

use crate::validation::check_agent_fields;

pub(crate) const ENTITY: &str = "sales_agent";

#[derive(Clone)]
pub struct AgentDirectory<A: AgentStore> {
    store: A,
}

impl<A: AgentStore> AgentDirectory<A> {
    pub fn new(store: A) -> Self {
        Self { store }
    }

    /// Create an agent. `name` is checked before `email`.
    pub async fn create(&self, fields: AgentFields) -> LeadflowResult<SalesAgent> {
        let input = check_agent_fields(fields)?;
        let agent = self.store.insert(input).await?;
        info!(agent_id = %agent.id, "Sales agent created");
        Ok(agent)
    }

    pub async fn get(&self, id: &str) -> LeadflowResult<SalesAgent> {
        let id = parse_id(ENTITY, id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| LeadflowError::not_found(ENTITY, id))
    }

    /// All agents. An empty directory is a valid, empty result.
    pub async fn list(&self) -> LeadflowResult<Vec<SalesAgent>> {
        self.store.find_all().await
    }

    /// Delete an agent and return the removed record. Leads and comments
    /// that still reference the agent are left untouched.
    pub async fn delete(&self, id: &str) -> LeadflowResult<SalesAgent> {
        let id = parse_id(ENTITY, id)?;
        let agent = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| LeadflowError::not_found(ENTITY, id))?;
        info!(agent_id = %id, "Sales agent deleted");
        Ok(agent)
    }

    /// Existence check for an already-parsed identifier.
    pub async fn exists(&self, id: Uuid) -> LeadflowResult<bool> {
        Ok(self.store.find_by_id(id).await?.is_some())
    }

    pub(crate) async fn find(&self, id: Uuid) -> LeadflowResult<Option<SalesAgent>> {
        self.store.find_by_id(id).await
    }

    /// Look up display names for the given ids. Ids that do not resolve
    /// are absent from the returned map.
    pub(crate) async fn names_for(
        &self,
        ids: impl IntoIterator<Item = Uuid>,
    ) -> LeadflowResult<HashMap<Uuid, String>> {
        let mut names = HashMap::new();
        let mut misses = HashSet::new();
        for id in ids {
            if names.contains_key(&id) || misses.contains(&id) {
                continue;
            }
            match self.store.find_by_id(id).await? {
                Some(agent) => {
                    names.insert(id, agent.name);
                }
                None => {
                    misses.insert(id);
                }
            }
        }
        debug!(resolved = names.len(), unresolved = misses.len(), "Resolved agent names");
        Ok(names)
    }
}
