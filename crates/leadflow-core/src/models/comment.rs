//! Comment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A timestamped note attached to exactly one lead. Immutable once
/// stored; only deletion is supported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub lead_id: Uuid,
    /// Sales agent credited with the comment. Not checked for existence
    /// on creation, see `CommentThreadService::add`.
    pub author_id: Uuid,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub lead_id: Uuid,
    pub author_id: Uuid,
    pub comment_text: String,
}

/// Read shape of a comment with its author resolved to a display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentView {
    pub id: Uuid,
    pub comment_text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}
