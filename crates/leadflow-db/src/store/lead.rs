//! SurrealDB implementation of [`LeadStore`].

use chrono::{DateTime, Utc};
use leadflow_core::error::LeadflowResult;
use leadflow_core::id::new_id;
use leadflow_core::models::lead::{CLOSED_STATUS, Lead, NewLead, Priority, StatusFilter};
use leadflow_core::models::report::GroupCount;
use leadflow_core::store::LeadStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, GroupRow, parse_uuid};
use crate::error::DbError;

const TABLE: &str = "lead";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct LeadRow {
    name: String,
    source: String,
    sales_agent: Vec<String>,
    status: String,
    tags: Vec<String>,
    time_to_close: u32,
    priority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct LeadRowWithId {
    record_id: String,
    name: String,
    source: String,
    sales_agent: Vec<String>,
    status: String,
    tags: Vec<String>,
    time_to_close: u32,
    priority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_priority(s: &str) -> Result<Priority, DbError> {
    s.parse().map_err(|e| DbError::decode(TABLE, e))
}

fn parse_agents(raw: &[String]) -> Result<Vec<Uuid>, DbError> {
    raw.iter().map(|id| parse_uuid("sales_agent", id)).collect()
}

fn agents_to_strings(ids: &[Uuid]) -> Vec<String> {
    ids.iter().map(Uuid::to_string).collect()
}

impl LeadRow {
    fn into_lead(self, id: Uuid) -> Result<Lead, DbError> {
        Ok(Lead {
            id,
            name: self.name,
            source: self.source,
            sales_agent: parse_agents(&self.sales_agent)?,
            status: self.status,
            tags: self.tags,
            time_to_close: self.time_to_close,
            priority: parse_priority(&self.priority)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl LeadRowWithId {
    fn try_into_lead(self) -> Result<Lead, DbError> {
        let id = parse_uuid(TABLE, &self.record_id)?;
        Ok(Lead {
            id,
            name: self.name,
            source: self.source,
            sales_agent: parse_agents(&self.sales_agent)?,
            status: self.status,
            tags: self.tags,
            time_to_close: self.time_to_close,
            priority: parse_priority(&self.priority)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn into_group_counts(rows: Vec<GroupRow>) -> Vec<GroupCount> {
    rows.into_iter()
        .filter_map(|row| {
            row.group_key.map(|key| GroupCount {
                key,
                count: row.total,
            })
        })
        .collect()
}

/// SurrealDB-backed lead collection.
#[derive(Clone)]
pub struct SurrealLeadStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLeadStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn select_many(
        &self,
        query: &str,
        binds: Vec<(&'static str, DateTime<Utc>)>,
    ) -> Result<Vec<Lead>, DbError> {
        let mut builder = self.db.query(query).bind(("closed", CLOSED_STATUS));
        for bind in binds {
            builder = builder.bind(bind);
        }
        let mut result = builder.await?;

        let rows: Vec<LeadRowWithId> = result.take(0)?;
        rows.into_iter().map(|row| row.try_into_lead()).collect()
    }
}

impl<C: Connection> LeadStore for SurrealLeadStore<C> {
    async fn insert(&self, input: NewLead) -> LeadflowResult<Lead> {
        let id = new_id();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('lead', $id) SET \
                 name = $name, source = $source, \
                 sales_agent = $sales_agent, status = $status, \
                 tags = $tags, time_to_close = $time_to_close, \
                 priority = $priority, \
                 created_at = $now, updated_at = $now",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("source", input.source))
            .bind(("sales_agent", agents_to_strings(&input.sales_agent)))
            .bind(("status", input.status))
            .bind(("tags", input.tags))
            .bind(("time_to_close", input.time_to_close))
            .bind(("priority", input.priority.as_str()))
            .bind(("now", Utc::now()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<LeadRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: TABLE.into(),
            id: id_str,
        })?;

        row.into_lead(id).map_err(Into::into)
    }

    async fn find_by_id(&self, id: Uuid) -> LeadflowResult<Option<Lead>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('lead', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LeadRow> = result.take(0).map_err(DbError::from)?;
        let lead = rows
            .into_iter()
            .next()
            .map(|row| row.into_lead(id))
            .transpose()?;

        Ok(lead)
    }

    async fn find_all(&self) -> LeadflowResult<Vec<Lead>> {
        let leads = self
            .select_many(
                "SELECT meta::id(id) AS record_id, * FROM lead \
                 ORDER BY created_at ASC",
                Vec::new(),
            )
            .await?;

        Ok(leads)
    }

    async fn find_closed_since(&self, cutoff: DateTime<Utc>) -> LeadflowResult<Vec<Lead>> {
        let leads = self
            .select_many(
                "SELECT meta::id(id) AS record_id, * FROM lead \
                 WHERE status = $closed AND updated_at >= $cutoff \
                 ORDER BY updated_at DESC",
                vec![("cutoff", cutoff)],
            )
            .await?;

        Ok(leads)
    }

    async fn update_by_id(&self, id: Uuid, input: NewLead) -> LeadflowResult<Option<Lead>> {
        let result = self
            .db
            .query(
                "UPDATE type::record('lead', $id) SET \
                 name = $name, source = $source, \
                 sales_agent = $sales_agent, status = $status, \
                 tags = $tags, time_to_close = $time_to_close, \
                 priority = $priority, updated_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .bind(("name", input.name))
            .bind(("source", input.source))
            .bind(("sales_agent", agents_to_strings(&input.sales_agent)))
            .bind(("status", input.status))
            .bind(("tags", input.tags))
            .bind(("time_to_close", input.time_to_close))
            .bind(("priority", input.priority.as_str()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<LeadRow> = result.take(0).map_err(DbError::from)?;
        let lead = rows
            .into_iter()
            .next()
            .map(|row| row.into_lead(id))
            .transpose()?;

        Ok(lead)
    }

    async fn delete_by_id(&self, id: Uuid) -> LeadflowResult<Option<Lead>> {
        let mut result = self
            .db
            .query("DELETE type::record('lead', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LeadRow> = result.take(0).map_err(DbError::from)?;
        let lead = rows
            .into_iter()
            .next()
            .map(|row| row.into_lead(id))
            .transpose()?;

        Ok(lead)
    }

    async fn count(&self, filter: StatusFilter) -> LeadflowResult<u64> {
        let (query, status) = match filter {
            StatusFilter::Is(status) => (
                "SELECT count() AS total FROM lead \
                 WHERE status = $status GROUP ALL",
                status,
            ),
            StatusFilter::IsNot(status) => (
                "SELECT count() AS total FROM lead \
                 WHERE status != $status GROUP ALL",
                status,
            ),
        };

        let mut result = self
            .db
            .query(query)
            .bind(("status", status))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn count_closed_by_primary_agent(&self) -> LeadflowResult<Vec<GroupCount>> {
        let mut result = self
            .db
            .query(
                "SELECT sales_agent[0] AS group_key, count() AS total \
                 FROM lead WHERE status = $closed GROUP BY group_key",
            )
            .bind(("closed", CLOSED_STATUS))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        Ok(into_group_counts(rows))
    }

    async fn count_by_status(&self) -> LeadflowResult<Vec<GroupCount>> {
        let mut result = self
            .db
            .query(
                "SELECT status AS group_key, count() AS total \
                 FROM lead GROUP BY group_key",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        Ok(into_group_counts(rows))
    }
}
