//! # Storage and Persistence
//!
//! Durable keyed storage for client configuration records, behind the
//! [`ClientConfigRepository`] trait so the backing implementation is
//! swappable without changing callers. Two implementations ship with the
//! crate: an in-memory map for embedded/test use and a SQLite-backed store
//! via sqlx.

pub mod audit;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sql;

pub use audit::{AuditEvent, AuditLogRepository, InMemoryAuditLog, SqlxAuditLogRepository};
pub use memory::InMemoryClientConfigRepository;
pub use migrations::run_migrations;
pub use pool::{create_pool, DbPool};
pub use repository::ClientConfigRepository;
pub use sql::SqlxClientConfigRepository;

use crate::errors::{CredplaneError, Result};

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map_err(|e| CredplaneError::Database {
        source: e,
        context: "Database connectivity check failed".to_string(),
    })?;

    Ok(())
}
