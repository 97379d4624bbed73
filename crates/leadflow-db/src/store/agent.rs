//! SurrealDB implementation of [`AgentStore`].

use chrono::{DateTime, Utc};
use leadflow_core::error::LeadflowResult;
use leadflow_core::id::new_id;
use leadflow_core::models::agent::{NewSalesAgent, SalesAgent};
use leadflow_core::store::AgentStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

const TABLE: &str = "sales_agent";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AgentRow {
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl AgentRow {
    fn into_agent(self, id: Uuid) -> SalesAgent {
        SalesAgent {
            id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AgentRowWithId {
    record_id: String,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl AgentRowWithId {
    fn try_into_agent(self) -> Result<SalesAgent, DbError> {
        let id = parse_uuid(TABLE, &self.record_id)?;
        Ok(SalesAgent {
            id,
            name: self.name,
            email: self.email,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB-backed sales agent collection.
#[derive(Clone)]
pub struct SurrealAgentStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAgentStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AgentStore for SurrealAgentStore<C> {
    async fn insert(&self, input: NewSalesAgent) -> LeadflowResult<SalesAgent> {
        let id = new_id();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('sales_agent', $id) SET \
                 name = $name, email = $email",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AgentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: TABLE.into(),
            id: id_str,
        })?;

        Ok(row.into_agent(id))
    }

    async fn find_by_id(&self, id: Uuid) -> LeadflowResult<Option<SalesAgent>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('sales_agent', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AgentRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.into_agent(id)))
    }

    async fn find_all(&self) -> LeadflowResult<Vec<SalesAgent>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM sales_agent \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AgentRowWithId> = result.take(0).map_err(DbError::from)?;
        let agents = rows
            .into_iter()
            .map(|row| row.try_into_agent())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(agents)
    }

    async fn delete_by_id(&self, id: Uuid) -> LeadflowResult<Option<SalesAgent>> {
        let mut result = self
            .db
            .query("DELETE type::record('sales_agent', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AgentRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.into_agent(id)))
    }
}
