//! SurrealDB implementation of [`CommentStore`].

use chrono::{DateTime, Utc};
use leadflow_core::error::LeadflowResult;
use leadflow_core::id::new_id;
use leadflow_core::models::comment::{Comment, NewComment};
use leadflow_core::store::CommentStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

const TABLE: &str = "lead_comment";

#[derive(Debug, SurrealValue)]
struct CommentRow {
    lead_id: String,
    author_id: String,
    comment_text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct CommentRowWithId {
    record_id: String,
    lead_id: String,
    author_id: String,
    comment_text: String,
    created_at: DateTime<Utc>,
}

fn row_to_comment(row: CommentRow, id: Uuid) -> Result<Comment, DbError> {
    Ok(Comment {
        id,
        lead_id: parse_uuid("lead", &row.lead_id)?,
        author_id: parse_uuid("sales_agent", &row.author_id)?,
        comment_text: row.comment_text,
        created_at: row.created_at,
    })
}

impl CommentRowWithId {
    fn try_into_comment(self) -> Result<Comment, DbError> {
        let id = parse_uuid(TABLE, &self.record_id)?;
        Ok(Comment {
            id,
            lead_id: parse_uuid("lead", &self.lead_id)?,
            author_id: parse_uuid("sales_agent", &self.author_id)?,
            comment_text: self.comment_text,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB-backed comment collection.
#[derive(Clone)]
pub struct SurrealCommentStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCommentStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CommentStore for SurrealCommentStore<C> {
    async fn insert(&self, input: NewComment) -> LeadflowResult<Comment> {
        let id = new_id();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('lead_comment', $id) SET \
                 lead_id = $lead_id, author_id = $author_id, \
                 comment_text = $comment_text",
            )
            .bind(("id", id_str.clone()))
            .bind(("lead_id", input.lead_id.to_string()))
            .bind(("author_id", input.author_id.to_string()))
            .bind(("comment_text", input.comment_text))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<CommentRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: TABLE.into(),
            id: id_str,
        })?;

        row_to_comment(row, id).map_err(Into::into)
    }

    async fn find_by_lead(&self, lead_id: Uuid) -> LeadflowResult<Vec<Comment>> {
        // Ids are UUIDv7, so `id` breaks timestamp ties in insertion order.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM lead_comment \
                 WHERE lead_id = $lead_id \
                 ORDER BY created_at ASC, id ASC",
            )
            .bind(("lead_id", lead_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CommentRowWithId> = result.take(0).map_err(DbError::from)?;
        let comments = rows
            .into_iter()
            .map(|row| row.try_into_comment())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(comments)
    }

    async fn delete_all(&self) -> LeadflowResult<u64> {
        // Count first, then delete.
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM lead_comment GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        self.db
            .query("DELETE lead_comment")
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        debug!(total, "Deleted all lead comments");
        Ok(total)
    }
}
