//! Business logic for issuing and managing client configuration credentials.
//!
//! [`ClientConfigService`] is the boundary the (external) presentation layer
//! calls: it validates requests, generates secret material, stamps the
//! authenticated actor into audit fields, records audit events, and delegates
//! persistence to an injected repository. The service is constructed
//! explicitly and owned by the hosting process; there is no global instance.

pub mod validation;

pub use validation::{CreateClientConfigRequest, UpdateClientConfigRequest};

use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, field, info, instrument};
use validator::Validate;

use crate::config::SecretPolicy;
use crate::domain::{
    ClientConfig, ClientConfigFilter, ConfigId, ConfigStatus, NewClientConfig, UpdateClientConfig,
};
use crate::errors::{CredplaneError, Result};
use crate::observability::metrics;
use crate::secrets::{disclose, ClientConfigView, DisclosureRequest, SecretGenerator};
use crate::storage::{
    AuditEvent, AuditLogRepository, ClientConfigRepository, DbPool, InMemoryAuditLog,
    InMemoryClientConfigRepository, SqlxAuditLogRepository, SqlxClientConfigRepository,
};

#[derive(Clone)]
pub struct ClientConfigService {
    repository: Arc<dyn ClientConfigRepository>,
    audit_log: Arc<dyn AuditLogRepository>,
    generator: SecretGenerator,
    policy: SecretPolicy,
}

impl ClientConfigService {
    pub fn new(
        repository: Arc<dyn ClientConfigRepository>,
        audit_log: Arc<dyn AuditLogRepository>,
        policy: SecretPolicy,
    ) -> Self {
        Self { repository, audit_log, generator: SecretGenerator::new(), policy }
    }

    /// Service over the SQLite-backed store.
    pub fn with_sqlx(pool: DbPool, policy: SecretPolicy) -> Self {
        Self::new(
            Arc::new(SqlxClientConfigRepository::new(pool.clone())),
            Arc::new(SqlxAuditLogRepository::new(pool)),
            policy,
        )
    }

    /// Service over the process-local store.
    pub fn in_memory(policy: SecretPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryClientConfigRepository::new()),
            Arc::new(InMemoryAuditLog::new()),
            policy,
        )
    }

    #[instrument(
        skip(self, payload),
        fields(client_id = field::Empty, correlation_id = field::Empty)
    )]
    pub async fn create_config(
        &self,
        payload: CreateClientConfigRequest,
        actor: &str,
    ) -> Result<ClientConfig> {
        payload.validate().map_err(CredplaneError::from)?;
        let actor = validate_actor(actor)?;
        let status = parse_status(&payload.status)?;

        tracing::Span::current().record("client_id", field::display(&payload.client_id));
        let correlation_id = uuid::Uuid::new_v4();
        tracing::Span::current().record("correlation_id", field::display(&correlation_id));

        let credentials = self.generator.generate_credential_set(&self.policy)?;

        let config = self
            .repository
            .create(NewClientConfig {
                client_id: payload.client_id,
                entity_id: payload.entity_id,
                status,
                credentials,
                created_by: actor.to_string(),
            })
            .await?;

        self.record_event(
            "client_config.created",
            Some(config.id),
            Some(&config.client_id),
            json!({
                "entity_id": config.entity_id,
                "status": config.status.as_str(),
                "created_by": actor,
            }),
        )
        .await?;
        metrics::record_config_created();
        metrics::set_active_configs(self.repository.count_active().await?);

        info!(%correlation_id, config_id = %config.id, "client configuration created");
        Ok(config)
    }

    #[instrument(skip(self), fields(config_id = %id))]
    pub async fn get_config(&self, id: ConfigId) -> Result<ClientConfig> {
        self.repository.get(id).await
    }

    #[instrument(skip(self, filter))]
    pub async fn list_configs(&self, filter: ClientConfigFilter) -> Result<Vec<ClientConfig>> {
        if let Some(tenant_id) = filter.tenant_id {
            // Entities are tenant-scoped externally; no mapping exists here.
            debug!(tenant_id, "tenant_id filter supplied; it does not narrow results");
        }
        self.repository.list(&filter).await
    }

    #[instrument(
        skip(self, payload),
        fields(config_id = %id, correlation_id = field::Empty)
    )]
    pub async fn update_config(
        &self,
        id: ConfigId,
        payload: UpdateClientConfigRequest,
        actor: &str,
    ) -> Result<ClientConfig> {
        payload.validate().map_err(CredplaneError::from)?;
        let actor = validate_actor(actor)?;

        let correlation_id = uuid::Uuid::new_v4();
        tracing::Span::current().record("correlation_id", field::display(&correlation_id));

        let status = match payload.status.as_deref() {
            Some(raw) => Some(parse_status(raw)?),
            None => None,
        };
        let update = UpdateClientConfig { client_id: payload.client_id, status };

        let config = self.repository.update_metadata(id, update, actor).await?;
        self.record_event(
            "client_config.updated",
            Some(config.id),
            Some(&config.client_id),
            json!({
                "status": config.status.as_str(),
                "updated_by": actor,
            }),
        )
        .await?;
        metrics::record_config_updated();
        metrics::set_active_configs(self.repository.count_active().await?);

        info!(%correlation_id, config_id = %config.id, "client configuration updated");
        Ok(config)
    }

    #[instrument(skip(self), fields(config_id = %id, correlation_id = field::Empty))]
    pub async fn delete_config(&self, id: ConfigId, actor: &str) -> Result<()> {
        let actor = validate_actor(actor)?;
        let correlation_id = uuid::Uuid::new_v4();
        tracing::Span::current().record("correlation_id", field::display(&correlation_id));

        self.repository.delete(id).await?;
        self.record_event(
            "client_config.deleted",
            Some(id),
            None,
            json!({ "deleted_by": actor }),
        )
        .await?;
        metrics::record_config_deleted();
        metrics::set_active_configs(self.repository.count_active().await?);

        info!(%correlation_id, config_id = %id, "client configuration deleted");
        Ok(())
    }

    /// Atomically replace all three secret fields with freshly generated
    /// values at the policy lengths. Non-secret fields and the creation
    /// stamps are untouched.
    #[instrument(skip(self), fields(config_id = %id, correlation_id = field::Empty))]
    pub async fn rotate_keys(&self, id: ConfigId, actor: &str) -> Result<ClientConfig> {
        let actor = validate_actor(actor)?;
        let correlation_id = uuid::Uuid::new_v4();
        tracing::Span::current().record("correlation_id", field::display(&correlation_id));

        let credentials = self.generator.generate_credential_set(&self.policy)?;
        let config = self.repository.rotate_secrets(id, credentials, actor).await?;

        self.record_event(
            "client_config.rotated",
            Some(config.id),
            Some(&config.client_id),
            json!({ "rotated_by": actor }),
        )
        .await?;
        metrics::record_config_rotated();

        info!(%correlation_id, config_id = %config.id, "client configuration keys rotated");
        Ok(config)
    }

    /// The explicit reveal action: fetch one record and apply the disclosure
    /// policy per the caller's per-field intent. List responses never go
    /// through this path and therefore stay masked.
    #[instrument(skip(self, request), fields(config_id = %id))]
    pub async fn disclose_config(
        &self,
        id: ConfigId,
        request: DisclosureRequest,
    ) -> Result<ClientConfigView> {
        let config = self.repository.get(id).await?;
        Ok(disclose(&config, &request))
    }

    async fn record_event(
        &self,
        action: &str,
        resource_id: Option<ConfigId>,
        resource_name: Option<&str>,
        metadata: serde_json::Value,
    ) -> Result<()> {
        self.audit_log
            .record_event(AuditEvent::client_config(action, resource_id, resource_name, metadata))
            .await
    }
}

fn parse_status(raw: &str) -> Result<ConfigStatus> {
    ConfigStatus::from_str(raw)
        .map_err(|err| CredplaneError::validation_field(err.to_string(), "status"))
}

fn validate_actor(actor: &str) -> Result<&str> {
    if actor.trim().is_empty() {
        return Err(CredplaneError::validation_field(
            "Actor identity is required for audit stamping",
            "actor",
        ));
    }
    Ok(actor)
}
