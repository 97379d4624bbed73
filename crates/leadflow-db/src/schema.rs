//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode. UUIDs are stored as
//! strings; the lead's agent list keeps its order so the first entry
//! stays the primary agent.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Sales agents
-- =======================================================================
DEFINE TABLE sales_agent SCHEMAFULL;
DEFINE FIELD name ON TABLE sales_agent TYPE string;
DEFINE FIELD email ON TABLE sales_agent TYPE string;
DEFINE FIELD created_at ON TABLE sales_agent TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_sales_agent_email ON TABLE sales_agent \
    COLUMNS email UNIQUE;

-- =======================================================================
-- Leads
-- =======================================================================
DEFINE TABLE lead SCHEMAFULL;
DEFINE FIELD name ON TABLE lead TYPE string;
DEFINE FIELD source ON TABLE lead TYPE string;
DEFINE FIELD sales_agent ON TABLE lead TYPE array<string>;
DEFINE FIELD status ON TABLE lead TYPE string;
DEFINE FIELD tags ON TABLE lead TYPE array<string>;
DEFINE FIELD time_to_close ON TABLE lead TYPE int;
DEFINE FIELD priority ON TABLE lead TYPE string \
    ASSERT $value IN ['High', 'Medium', 'Low'];
DEFINE FIELD created_at ON TABLE lead TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE lead TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_lead_status ON TABLE lead COLUMNS status;

-- =======================================================================
-- Comments (children of a lead, never cascaded)
-- =======================================================================
DEFINE TABLE lead_comment SCHEMAFULL;
DEFINE FIELD lead_id ON TABLE lead_comment TYPE string;
DEFINE FIELD author_id ON TABLE lead_comment TYPE string;
DEFINE FIELD comment_text ON TABLE lead_comment TYPE string;
DEFINE FIELD created_at ON TABLE lead_comment TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_lead_comment_lead ON TABLE lead_comment \
    COLUMNS lead_id;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Bring the leadflow schema up to the newest version.
///
/// The `_migration` table records every applied version, so rerunning
/// against an up-to-date database is a no-op. Returns how many versions
/// were applied by this call.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<usize, DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let from = applied_version(db).await?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > from).collect();
    if pending.is_empty() {
        debug!(version = from, "Leadflow schema is current");
        return Ok(0);
    }

    for migration in &pending {
        apply(db, migration).await?;
    }

    info!(
        from,
        to = pending.last().map_or(from, |m| m.version),
        applied = pending.len(),
        "Leadflow schema upgraded"
    );
    Ok(pending.len())
}

async fn applied_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    Ok(records.first().map_or(0, |m| m.version))
}

/// Runs one migration's DDL and records its version in the same
/// transaction, so a failed DDL leaves no record behind.
async fn apply<C: Connection>(db: &Surreal<C>, migration: &Migration) -> Result<(), DbError> {
    debug!(version = migration.version, name = migration.name, "Applying leadflow migration");
    let sql = format!(
        "BEGIN TRANSACTION;\n{}\nCREATE _migration SET version = $version, name = $name;\nCOMMIT TRANSACTION;",
        migration.sql
    );
    db.query(sql)
        .bind(("version", migration.version))
        .bind(("name", migration.name))
        .await?
        .check()
        .map_err(|e| {
            DbError::Migration(format!(
                "leadflow schema v{} ({}) failed: {e}",
                migration.version, migration.name
            ))
        })?;
    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
