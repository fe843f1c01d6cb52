//! Audit trail for credential lifecycle events.
//!
//! Every mutation of a client configuration is recorded as an event. Event
//! metadata carries non-secret fields only; credential values never reach
//! this module. Deletion is a hard delete on the record itself, so the audit
//! row is what survives it.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::ConfigId;
use crate::errors::{CredplaneError, Result};
use crate::storage::DbPool;

/// Audit event descriptor for client configuration lifecycle activity.
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub action: String,
    pub resource_id: Option<String>,
    pub resource_name: Option<String>,
    pub metadata: serde_json::Value,
}

impl AuditEvent {
    pub fn client_config(
        action: &str,
        resource_id: Option<ConfigId>,
        resource_name: Option<&str>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            action: action.to_string(),
            resource_id: resource_id.map(|id| id.to_string()),
            resource_name: resource_name.map(|value| value.to_string()),
            metadata,
        }
    }
}

/// Sink for audit events.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn record_event(&self, event: AuditEvent) -> Result<()>;
}

/// Audit sink backed by a process-local vector. Pairs with the in-memory
/// record store; also what the integration tests inspect.
#[derive(Debug, Default)]
pub struct InMemoryAuditLog {
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit log mutex poisoned").clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn record_event(&self, event: AuditEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| CredplaneError::internal("audit log mutex poisoned"))?
            .push(event);
        Ok(())
    }
}

/// Audit sink writing to the `audit_log` table.
#[derive(Debug, Clone)]
pub struct SqlxAuditLogRepository {
    pool: DbPool,
}

impl SqlxAuditLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for SqlxAuditLogRepository {
    async fn record_event(&self, event: AuditEvent) -> Result<()> {
        let metadata_json = serde_json::to_string(&event.metadata).map_err(|err| {
            CredplaneError::validation(format!("Invalid audit metadata JSON: {}", err))
        })?;
        let resource_name = event.resource_name.unwrap_or_else(|| event.action.clone());

        sqlx::query(
            "INSERT INTO audit_log (id, resource_type, resource_id, resource_name, action, \
             metadata, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind("client_config")
        .bind(event.resource_id.as_deref())
        .bind(&resource_name)
        .bind(event.action.as_str())
        .bind(metadata_json)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to write client configuration audit event".to_string(),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn in_memory_log_preserves_event_order() {
        let log = InMemoryAuditLog::new();

        for action in ["client_config.created", "client_config.rotated", "client_config.deleted"]
        {
            log.record_event(AuditEvent::client_config(
                action,
                Some(ConfigId::from_i64(1)),
                Some("AHIS"),
                json!({}),
            ))
            .await
            .unwrap();
        }

        let events = log.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].action, "client_config.created");
        assert_eq!(events[2].action, "client_config.deleted");
        assert_eq!(events[0].resource_id.as_deref(), Some("1"));
    }
}
