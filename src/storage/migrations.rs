//! Schema setup for the SQLite-backed store.
//!
//! AUTOINCREMENT on `client_configs.id` keeps deleted ids from being reused,
//! which the id contract requires.

use crate::errors::{CredplaneError, Result};
use crate::storage::DbPool;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS client_configs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id TEXT NOT NULL,
        client_secret_key TEXT NOT NULL,
        client_access_token TEXT NOT NULL,
        client_shared_key TEXT NOT NULL,
        status TEXT NOT NULL,
        entity_id INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        created_by TEXT NOT NULL,
        updated_by TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_client_configs_entity_id ON client_configs (entity_id)",
    "CREATE INDEX IF NOT EXISTS idx_client_configs_status ON client_configs (status)",
    "CREATE TABLE IF NOT EXISTS audit_log (
        id TEXT PRIMARY KEY,
        resource_type TEXT NOT NULL,
        resource_id TEXT,
        resource_name TEXT NOT NULL,
        action TEXT NOT NULL,
        metadata TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
];

/// Apply the schema. Idempotent; safe to run on every startup.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await.map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to apply storage schema".to_string(),
        })?;
    }

    tracing::debug!(statements = SCHEMA.len(), "storage schema applied");
    Ok(())
}
