//! Comment Thread Service — comments attached to leads.
//!
//! Author references are deliberately lenient: a comment is stored even
//! when its author does not resolve to an agent, and the author shows up
//! as the configured unknown label when the thread is read. Lead agent
//! references, by contrast, are checked strictly on write.

use leadflow_core::error::{LeadflowError, LeadflowResult};
use leadflow_core::id::parse_id;
use leadflow_core::models::comment::{Comment, CommentView, NewComment};
use leadflow_core::store::{AgentStore, CommentStore, LeadStore};
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent::{self, AgentDirectory};
use crate::config::ServiceConfig;
use crate::lead::{self, LeadRepository};

pub struct CommentThreadService<C: CommentStore, L: LeadStore, A: AgentStore> {
    store: C,
    leads: LeadRepository<L, A>,
    agents: AgentDirectory<A>,
    config: ServiceConfig,
}

impl<C: CommentStore, L: LeadStore, A: AgentStore> CommentThreadService<C, L, A> {
    pub fn new(
        store: C,
        leads: LeadRepository<L, A>,
        agents: AgentDirectory<A>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            store,
            leads,
            agents,
            config,
        }
    }

    /// Attach a comment to a lead.
    ///
    /// Text and author presence are checked before the lead is looked
    /// up, so an empty comment fails with `Validation` whether or not the
    /// lead exists.
    pub async fn add(
        &self,
        lead_id: &str,
        author_id: &str,
        comment_text: &str,
    ) -> LeadflowResult<Comment> {
        if comment_text.is_empty() {
            return Err(LeadflowError::missing("comment_text"));
        }
        if author_id.is_empty() {
            return Err(LeadflowError::missing("author_id"));
        }

        let lead_id = self.existing_lead(lead_id).await?;
        let author_id = parse_id(agent::ENTITY, author_id)?;

        let comment = self
            .store
            .insert(NewComment {
                lead_id,
                author_id,
                comment_text: comment_text.to_string(),
            })
            .await?;

        info!(comment_id = %comment.id, lead_id = %lead_id, "Comment added");
        Ok(comment)
    }

    /// The lead's comments, oldest first, with author names resolved.
    pub async fn list_for_lead(&self, lead_id: &str) -> LeadflowResult<Vec<CommentView>> {
        let lead_id = self.existing_lead(lead_id).await?;
        let comments = self.store.find_by_lead(lead_id).await?;
        let names = self
            .agents
            .names_for(comments.iter().map(|c| c.author_id))
            .await?;

        Ok(comments
            .into_iter()
            .map(|c| {
                let author = match names.get(&c.author_id) {
                    Some(name) => name.clone(),
                    None => {
                        warn!(comment_id = %c.id, author_id = %c.author_id, "Comment author not found");
                        self.config.unknown_label.clone()
                    }
                };
                CommentView {
                    id: c.id,
                    comment_text: c.comment_text,
                    author,
                    created_at: c.created_at,
                }
            })
            .collect())
    }

    /// Remove every comment on every lead; returns how many were removed.
    pub async fn delete_all(&self) -> LeadflowResult<u64> {
        let deleted = self.store.delete_all().await?;
        info!(deleted, "All comments deleted");
        Ok(deleted)
    }

    async fn existing_lead(&self, lead_id: &str) -> LeadflowResult<Uuid> {
        let id = parse_id(lead::ENTITY, lead_id)?;
        if !self.leads.exists(id).await? {
            return Err(LeadflowError::not_found(lead::ENTITY, id));
        }
        Ok(id)
    }
}
