//! Integration tests for the Lead Repository using in-memory SurrealDB.

use leadflow_core::error::LeadflowError;
use leadflow_core::models::agent::{AgentFields, SalesAgent};
use leadflow_core::models::lead::{LeadFields, Priority, StatusFilter};
use leadflow_db::store::{SurrealAgentStore, SurrealLeadStore};
use leadflow_service::{AgentDirectory, LeadRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Agents = AgentDirectory<SurrealAgentStore<Db>>;
type Leads = LeadRepository<SurrealLeadStore<Db>, SurrealAgentStore<Db>>;

async fn setup() -> (Agents, Leads) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    leadflow_db::run_migrations(&db).await.unwrap();

    let agents = AgentDirectory::new(SurrealAgentStore::new(db.clone()));
    let leads = LeadRepository::new(SurrealLeadStore::new(db), agents.clone());
    (agents, leads)
}

async fn agent(agents: &Agents, name: &str) -> SalesAgent {
    agents
        .create(AgentFields {
            name: Some(name.into()),
            email: Some(format!("{}@x.com", name.to_lowercase())),
        })
        .await
        .unwrap()
}

fn acme(agent_ids: &[Uuid]) -> LeadFields {
    LeadFields {
        name: Some("Acme".into()),
        source: Some("web".into()),
        sales_agent: Some(agent_ids.iter().map(Uuid::to_string).collect()),
        status: Some("New".into()),
        tags: Some(vec!["hot".into()]),
        time_to_close: Some(10),
        priority: Some("High".into()),
    }
}

async fn total_leads(leads: &Leads) -> usize {
    leads.list().await.unwrap().len()
}

#[tokio::test]
async fn create_lead_with_existing_agent() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;

    let lead = leads.create(acme(&[ann.id])).await.unwrap();
    assert_eq!(lead.status, "New");
    assert_eq!(lead.sales_agent, vec![ann.id]);
    assert_eq!(lead.priority, Priority::High);
    assert_eq!(lead.created_at, lead.updated_at);

    let fetched = leads.get(&lead.id.to_string()).await.unwrap();
    assert_eq!(fetched, lead);
}

#[tokio::test]
async fn missing_field_is_named_and_nothing_is_persisted() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;

    let err = leads
        .create(LeadFields {
            tags: None,
            ..acme(&[ann.id])
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LeadflowError::Validation { ref field, .. } if field == "tags"));
    assert_eq!(total_leads(&leads).await, 0);
}

#[tokio::test]
async fn unknown_agent_is_a_reference_error() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;
    let ghost = Uuid::now_v7();

    let err = leads.create(acme(&[ann.id, ghost])).await.unwrap_err();
    match err {
        LeadflowError::Reference { entity, id } => {
            assert_eq!(entity, "sales_agent");
            assert_eq!(id, ghost.to_string());
        }
        other => panic!("expected Reference, got {other:?}"),
    }
    assert_eq!(total_leads(&leads).await, 0);
}

#[tokio::test]
async fn malformed_agent_id_is_rejected_before_lookup() {
    let (_agents, leads) = setup().await;

    let mut fields = acme(&[]);
    fields.sales_agent = Some(vec!["A1".into()]);

    let err = leads.create(fields).await.unwrap_err();
    assert!(matches!(err, LeadflowError::InvalidId { ref id, .. } if id == "A1"));
    assert_eq!(total_leads(&leads).await, 0);
}

#[tokio::test]
async fn get_with_agents_resolves_and_skips_orphans() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;
    let bob = agent(&agents, "Bob").await;
    let lead = leads.create(acme(&[ann.id, bob.id])).await.unwrap();

    agents.delete(&bob.id.to_string()).await.unwrap();

    let view = leads.get_with_agents(&lead.id.to_string()).await.unwrap();
    assert_eq!(view.lead.sales_agent, vec![ann.id, bob.id]);
    assert_eq!(view.agents, vec![ann.summary()]);
}

#[tokio::test]
async fn list_attaches_agent_summaries() {
    let (agents, leads) = setup().await;
    assert!(leads.list().await.unwrap().is_empty());

    let ann = agent(&agents, "Ann").await;
    leads.create(acme(&[ann.id])).await.unwrap();

    let all = leads.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].agents[0].name, "Ann");
}

#[tokio::test]
async fn update_replaces_fields_and_resolves_primary_agent() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;
    let bob = agent(&agents, "Bob").await;
    let lead = leads.create(acme(&[ann.id])).await.unwrap();

    let updated = leads
        .update(
            &lead.id.to_string(),
            LeadFields {
                status: Some("Closed".into()),
                priority: Some("Low".into()),
                ..acme(&[bob.id, ann.id])
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.lead.id, lead.id);
    assert_eq!(updated.lead.status, "Closed");
    assert_eq!(updated.lead.priority, Priority::Low);
    assert_eq!(updated.lead.sales_agent, vec![bob.id, ann.id]);
    assert!(updated.lead.updated_at >= lead.updated_at);
    assert_eq!(updated.lead.created_at, lead.created_at);
    assert_eq!(updated.primary_agent, Some(bob.summary()));
}

#[tokio::test]
async fn update_applies_create_checks() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;
    let lead = leads.create(acme(&[ann.id])).await.unwrap();
    let id = lead.id.to_string();

    let err = leads
        .update(
            &id,
            LeadFields {
                priority: None,
                ..acme(&[ann.id])
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LeadflowError::Validation { ref field, .. } if field == "priority"));

    let err = leads.update(&id, acme(&[Uuid::now_v7()])).await.unwrap_err();
    assert!(matches!(err, LeadflowError::Reference { .. }));

    let unchanged = leads.get(&id).await.unwrap();
    assert_eq!(unchanged, lead);
}

#[tokio::test]
async fn update_unknown_or_malformed_lead() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;

    let err = leads
        .update(&Uuid::now_v7().to_string(), acme(&[ann.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, LeadflowError::NotFound { .. }));

    let err = leads.update("not-an-id", acme(&[ann.id])).await.unwrap_err();
    assert!(matches!(err, LeadflowError::InvalidId { .. }));
}

#[tokio::test]
async fn delete_returns_record_then_not_found() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;
    let lead = leads.create(acme(&[ann.id])).await.unwrap();
    let id = lead.id.to_string();

    let deleted = leads.delete(&id).await.unwrap();
    assert_eq!(deleted.id, lead.id);

    assert!(matches!(
        leads.get(&id).await.unwrap_err(),
        LeadflowError::NotFound { .. }
    ));
    assert!(matches!(
        leads.delete(&id).await.unwrap_err(),
        LeadflowError::NotFound { .. }
    ));
}

#[tokio::test]
async fn count_by_status_follows_updates() {
    let (agents, leads) = setup().await;
    let ann = agent(&agents, "Ann").await;
    let lead = leads.create(acme(&[ann.id])).await.unwrap();

    assert_eq!(leads.count_by_status(StatusFilter::open()).await.unwrap(), 1);
    assert_eq!(leads.count_by_status(StatusFilter::closed()).await.unwrap(), 0);

    leads
        .update(
            &lead.id.to_string(),
            LeadFields {
                status: Some("Closed".into()),
                ..acme(&[ann.id])
            },
        )
        .await
        .unwrap();

    assert_eq!(leads.count_by_status(StatusFilter::open()).await.unwrap(), 0);
    assert_eq!(leads.count_by_status(StatusFilter::closed()).await.unwrap(), 1);
}
