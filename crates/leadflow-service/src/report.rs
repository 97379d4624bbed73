//! Reporting Aggregator — read-only summaries over the lead population.
//!
//! Every call reads current store state; nothing is cached.

use std::cmp::Reverse;

use chrono::{DateTime, Duration, Utc};
use leadflow_core::error::LeadflowResult;
use leadflow_core::models::lead::StatusFilter;
use leadflow_core::models::report::{AgentClosures, ClosedLead, PipelineSummary, StatusCount};
use leadflow_core::store::{AgentStore, LeadStore};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::agent::AgentDirectory;
use crate::config::ServiceConfig;
use crate::lead::LeadRepository;

pub struct ReportingAggregator<L: LeadStore, A: AgentStore> {
    leads: LeadRepository<L, A>,
    agents: AgentDirectory<A>,
    config: ServiceConfig,
}

impl<L: LeadStore, A: AgentStore> ReportingAggregator<L, A> {
    pub fn new(leads: LeadRepository<L, A>, agents: AgentDirectory<A>, config: ServiceConfig) -> Self {
        Self {
            leads,
            agents,
            config,
        }
    }

    /// Leads closed within the last `days` days, judged by `updated_at`,
    /// most recently closed first. A window reaching past the earliest
    /// representable time covers every closed lead.
    pub async fn closed_last_n_days(&self, days: u32) -> LeadflowResult<Vec<ClosedLead>> {
        let cutoff = Utc::now()
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let leads = self.leads.closed_since(cutoff).await?;
        let names = self
            .agents
            .names_for(leads.iter().filter_map(|l| l.primary_agent()))
            .await?;

        debug!(days, count = leads.len(), "Computed recent closures");
        Ok(leads
            .into_iter()
            .map(|lead| {
                let agent_name = lead
                    .primary_agent()
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| self.config.unknown_label.clone());
                ClosedLead {
                    lead_id: lead.id,
                    name: lead.name,
                    agent_name,
                    closed_at: lead.updated_at,
                }
            })
            .collect())
    }

    /// [`closed_last_n_days`](Self::closed_last_n_days) over the
    /// configured reporting window.
    pub async fn closed_last_week(&self) -> LeadflowResult<Vec<ClosedLead>> {
        self.closed_last_n_days(self.config.report_window_days).await
    }

    /// Open versus closed counts. Together they cover every lead once.
    pub async fn pipeline_summary(&self) -> LeadflowResult<PipelineSummary> {
        let open_count = self.leads.count_by_status(StatusFilter::open()).await?;
        let closed_count = self.leads.count_by_status(StatusFilter::closed()).await?;
        Ok(PipelineSummary {
            open_count,
            closed_count,
        })
    }

    /// Closed leads per primary agent, highest count first. Equal counts
    /// are ordered by agent id ascending. Groups whose agent no longer
    /// exists are dropped.
    pub async fn closures_by_agent(&self) -> LeadflowResult<Vec<AgentClosures>> {
        let groups = self.leads.closed_counts_by_primary_agent().await?;

        let mut rows = Vec::with_capacity(groups.len());
        for group in groups {
            let Ok(agent_id) = Uuid::try_parse(&group.key) else {
                warn!(key = %group.key, "Skipping closures for malformed agent id");
                continue;
            };
            match self.agents.find(agent_id).await? {
                Some(agent) => rows.push(AgentClosures {
                    agent_id,
                    agent_name: agent.name,
                    count: group.count,
                }),
                None => warn!(agent_id = %agent_id, count = group.count, "Skipping closures for unknown agent"),
            }
        }

        rows.sort_by_key(|r| (Reverse(r.count), r.agent_id));
        Ok(rows)
    }

    /// Lead counts per status value, ordered by status ascending.
    pub async fn status_distribution(&self) -> LeadflowResult<Vec<StatusCount>> {
        let mut rows: Vec<StatusCount> = self
            .leads
            .status_counts()
            .await?
            .into_iter()
            .map(|g| StatusCount {
                status: g.key,
                count: g.count,
            })
            .collect();

        rows.sort_by(|a, b| a.status.cmp(&b.status));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use leadflow_core::models::agent::{NewSalesAgent, SalesAgent};
    use leadflow_core::models::lead::{Lead, NewLead, Priority};
    use leadflow_core::models::report::GroupCount;

    use super::*;

    #[derive(Clone, Default)]
    struct FixedAgents(Vec<SalesAgent>);

    impl AgentStore for FixedAgents {
        async fn insert(&self, _input: NewSalesAgent) -> LeadflowResult<SalesAgent> {
            unreachable!("reports never write")
        }

        async fn find_by_id(&self, id: Uuid) -> LeadflowResult<Option<SalesAgent>> {
            Ok(self.0.iter().find(|a| a.id == id).cloned())
        }

        async fn find_all(&self) -> LeadflowResult<Vec<SalesAgent>> {
            Ok(self.0.clone())
        }

        async fn delete_by_id(&self, _id: Uuid) -> LeadflowResult<Option<SalesAgent>> {
            unreachable!("reports never write")
        }
    }

    #[derive(Clone, Default)]
    struct FixedLeads(Vec<Lead>);

    impl FixedLeads {
        fn snapshot(&self) -> Vec<Lead> {
            self.0.clone()
        }
    }

    impl LeadStore for FixedLeads {
        async fn insert(&self, _input: NewLead) -> LeadflowResult<Lead> {
            unreachable!("reports never write")
        }

        async fn find_by_id(&self, id: Uuid) -> LeadflowResult<Option<Lead>> {
            Ok(self.snapshot().into_iter().find(|l| l.id == id))
        }

        async fn find_all(&self) -> LeadflowResult<Vec<Lead>> {
            Ok(self.snapshot())
        }

        async fn find_closed_since(&self, cutoff: DateTime<Utc>) -> LeadflowResult<Vec<Lead>> {
            Ok(self
                .snapshot()
                .into_iter()
                .filter(|l| l.is_closed() && l.updated_at >= cutoff)
                .collect())
        }

        async fn update_by_id(&self, _id: Uuid, _input: NewLead) -> LeadflowResult<Option<Lead>> {
            unreachable!("reports never write")
        }

        async fn delete_by_id(&self, _id: Uuid) -> LeadflowResult<Option<Lead>> {
            unreachable!("reports never write")
        }

        async fn count(&self, filter: StatusFilter) -> LeadflowResult<u64> {
            Ok(self
                .snapshot()
                .iter()
                .filter(|l| filter.matches(&l.status))
                .count() as u64)
        }

        async fn count_closed_by_primary_agent(&self) -> LeadflowResult<Vec<GroupCount>> {
            Ok(Vec::new())
        }

        async fn count_by_status(&self) -> LeadflowResult<Vec<GroupCount>> {
            Ok(Vec::new())
        }
    }

    fn closed_lead(name: &str, agent: Uuid, age_days: i64) -> Lead {
        let at = Utc::now() - Duration::days(age_days);
        Lead {
            id: Uuid::now_v7(),
            name: name.into(),
            source: "web".into(),
            sales_agent: vec![agent],
            status: "Closed".into(),
            tags: vec!["hot".into()],
            time_to_close: 10,
            priority: Priority::High,
            created_at: at,
            updated_at: at,
        }
    }

    fn aggregator(leads: Vec<Lead>, agents: Vec<SalesAgent>) -> ReportingAggregator<FixedLeads, FixedAgents> {
        let agents = AgentDirectory::new(FixedAgents(agents));
        let leads = LeadRepository::new(FixedLeads(leads), agents.clone());
        ReportingAggregator::new(leads, agents, ServiceConfig::default())
    }

    #[tokio::test]
    async fn widest_window_covers_every_closed_lead() {
        let ann = SalesAgent {
            id: Uuid::now_v7(),
            name: "Ann".into(),
            email: "a@x.com".into(),
            created_at: Utc::now(),
        };
        let reports = aggregator(
            vec![
                closed_lead("Recent", ann.id, 2),
                closed_lead("Ancient", ann.id, 365 * 50),
            ],
            vec![ann],
        );

        let closed = reports.closed_last_n_days(u32::MAX).await.unwrap();
        let mut names: Vec<_> = closed.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Ancient", "Recent"]);
        assert!(closed.iter().all(|c| c.agent_name == "Ann"));
    }

    #[tokio::test]
    async fn ordinary_window_still_filters() {
        let agent = Uuid::now_v7();
        let reports = aggregator(
            vec![closed_lead("Recent", agent, 2), closed_lead("Old", agent, 10)],
            Vec::new(),
        );

        let closed = reports.closed_last_n_days(7).await.unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].name, "Recent");
        assert_eq!(closed[0].agent_name, "Unknown");
    }
}
