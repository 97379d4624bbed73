//! Integration tests for the Agent Directory using in-memory SurrealDB.

use leadflow_core::error::LeadflowError;
use leadflow_core::models::agent::AgentFields;
use leadflow_db::store::SurrealAgentStore;
use leadflow_service::AgentDirectory;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> AgentDirectory<SurrealAgentStore<Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    leadflow_db::run_migrations(&db).await.unwrap();
    AgentDirectory::new(SurrealAgentStore::new(db))
}

fn fields(name: &str, email: &str) -> AgentFields {
    AgentFields {
        name: Some(name.into()),
        email: Some(email.into()),
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let agents = setup().await;

    let ann = agents.create(fields("Ann", "a@x.com")).await.unwrap();
    assert_eq!(ann.name, "Ann");
    assert_eq!(ann.email, "a@x.com");

    let fetched = agents.get(&ann.id.to_string()).await.unwrap();
    assert_eq!(fetched, ann);
}

#[tokio::test]
async fn create_requires_name_then_email() {
    let agents = setup().await;

    let err = agents
        .create(AgentFields {
            name: None,
            email: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LeadflowError::Validation { ref field, .. } if field == "name"));

    let err = agents
        .create(AgentFields {
            name: Some("Ann".into()),
            email: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LeadflowError::Validation { ref field, .. } if field == "email"));

    assert!(agents.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_distinguishes_malformed_from_missing() {
    let agents = setup().await;

    let err = agents.get("A1").await.unwrap_err();
    assert!(matches!(err, LeadflowError::InvalidId { .. }));

    let err = agents.get(&Uuid::now_v7().to_string()).await.unwrap_err();
    assert!(matches!(err, LeadflowError::NotFound { .. }));
}

#[tokio::test]
async fn list_is_empty_then_populated() {
    let agents = setup().await;
    assert!(agents.list().await.unwrap().is_empty());

    agents.create(fields("Ann", "a@x.com")).await.unwrap();
    agents.create(fields("Bob", "b@x.com")).await.unwrap();

    let names: Vec<_> = agents
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[tokio::test]
async fn delete_returns_record_and_second_delete_is_not_found() {
    let agents = setup().await;
    let ann = agents.create(fields("Ann", "a@x.com")).await.unwrap();
    let id = ann.id.to_string();

    let deleted = agents.delete(&id).await.unwrap();
    assert_eq!(deleted.id, ann.id);
    assert!(!agents.exists(ann.id).await.unwrap());

    let err = agents.delete(&id).await.unwrap_err();
    assert!(matches!(err, LeadflowError::NotFound { .. }));
}
