//! In-memory implementation of the credential record store.
//!
//! Records live in a `BTreeMap` keyed by id behind a `tokio::sync::RwLock`.
//! Ids come from a monotonic counter that never decrements, so iteration
//! order over the map is insertion order and deleted ids are never reused.
//! Mutations replace whole records under the write lock and the critical
//! sections contain no await points, so readers always see a complete record
//! from exactly one finished operation and an abandoned caller cannot leave a
//! partial write behind.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::{
    ClientConfig, ClientConfigFilter, ConfigId, NewClientConfig, UpdateClientConfig,
};
use crate::errors::{CredplaneError, Result};
use crate::secrets::CredentialSet;
use crate::storage::ClientConfigRepository;

const RESOURCE: &str = "client_config";

#[derive(Debug, Default)]
struct StoreState {
    rows: BTreeMap<i64, ClientConfig>,
    next_id: i64,
}

/// Process-local credential record store.
#[derive(Debug, Default)]
pub struct InMemoryClientConfigRepository {
    state: RwLock<StoreState>,
}

impl InMemoryClientConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Timestamp for a mutation of an existing record. `updated_at` must strictly
/// increase across mutations, so a clock reading that ties the previous stamp
/// is nudged forward.
fn stamp_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl ClientConfigRepository for InMemoryClientConfigRepository {
    async fn create(&self, new: NewClientConfig) -> Result<ClientConfig> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();

        let config = ClientConfig {
            id: ConfigId::from_i64(id),
            client_id: new.client_id,
            client_secret_key: new.credentials.secret_key,
            client_access_token: new.credentials.access_token,
            client_shared_key: new.credentials.shared_key,
            status: new.status,
            entity_id: new.entity_id,
            created_at: now,
            updated_at: now,
            created_by: new.created_by.clone(),
            updated_by: new.created_by,
        };

        state.rows.insert(id, config.clone());
        Ok(config)
    }

    async fn get(&self, id: ConfigId) -> Result<ClientConfig> {
        let state = self.state.read().await;
        state
            .rows
            .get(&id.as_i64())
            .cloned()
            .ok_or_else(|| CredplaneError::not_found(RESOURCE, id))
    }

    async fn list(&self, filter: &ClientConfigFilter) -> Result<Vec<ClientConfig>> {
        let state = self.state.read().await;
        Ok(state.rows.values().filter(|config| filter.matches(config)).cloned().collect())
    }

    async fn update_metadata(
        &self,
        id: ConfigId,
        update: UpdateClientConfig,
        actor: &str,
    ) -> Result<ClientConfig> {
        let mut state = self.state.write().await;
        let config = state
            .rows
            .get_mut(&id.as_i64())
            .ok_or_else(|| CredplaneError::not_found(RESOURCE, id))?;

        if let Some(client_id) = update.client_id {
            config.client_id = client_id;
        }
        if let Some(status) = update.status {
            config.status = status;
        }
        config.updated_at = stamp_after(config.updated_at);
        config.updated_by = actor.to_string();

        Ok(config.clone())
    }

    async fn rotate_secrets(
        &self,
        id: ConfigId,
        credentials: CredentialSet,
        actor: &str,
    ) -> Result<ClientConfig> {
        let mut state = self.state.write().await;
        let config = state
            .rows
            .get_mut(&id.as_i64())
            .ok_or_else(|| CredplaneError::not_found(RESOURCE, id))?;

        config.client_secret_key = credentials.secret_key;
        config.client_access_token = credentials.access_token;
        config.client_shared_key = credentials.shared_key;
        config.updated_at = stamp_after(config.updated_at);
        config.updated_by = actor.to_string();

        Ok(config.clone())
    }

    async fn delete(&self, id: ConfigId) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .rows
            .remove(&id.as_i64())
            .map(|_| ())
            .ok_or_else(|| CredplaneError::not_found(RESOURCE, id))
    }

    async fn count(&self) -> Result<i64> {
        let state = self.state.read().await;
        Ok(state.rows.len() as i64)
    }

    async fn count_active(&self) -> Result<i64> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .filter(|config| config.status == crate::domain::ConfigStatus::Active)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigStatus;
    use crate::secrets::SecretString;

    fn new_config(client_id: &str, entity_id: i64, status: ConfigStatus) -> NewClientConfig {
        NewClientConfig {
            client_id: client_id.to_string(),
            entity_id,
            status,
            credentials: CredentialSet {
                secret_key: SecretString::new(format!("sk-{}", client_id)),
                access_token: SecretString::new(format!("at-{}", client_id)),
                shared_key: SecretString::new(format!("shk-{}", client_id)),
            },
            created_by: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_stamps_audit_fields() {
        let repo = InMemoryClientConfigRepository::new();

        let first = repo.create(new_config("AHIS", 1, ConfigStatus::Active)).await.unwrap();
        let second = repo.create(new_config("AHCC", 1, ConfigStatus::Pending)).await.unwrap();

        assert_eq!(first.id.as_i64(), 1);
        assert_eq!(second.id.as_i64(), 2);
        assert_eq!(first.created_by, "admin");
        assert_eq!(first.updated_by, "admin");
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryClientConfigRepository::new();

        let first = repo.create(new_config("AHIS", 1, ConfigStatus::Active)).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(new_config("AHCC", 1, ConfigStatus::Active)).await.unwrap();
        assert!(second.id.as_i64() > first.id.as_i64());
    }

    #[tokio::test]
    async fn update_changes_only_requested_fields() {
        let repo = InMemoryClientConfigRepository::new();
        let created = repo.create(new_config("AHIS", 1, ConfigStatus::Pending)).await.unwrap();

        let updated = repo
            .update_metadata(
                created.id,
                UpdateClientConfig { client_id: None, status: Some(ConfigStatus::Active) },
                "operator",
            )
            .await
            .unwrap();

        assert_eq!(updated.client_id, "AHIS");
        assert_eq!(updated.status, ConfigStatus::Active);
        assert_eq!(updated.updated_by, "operator");
        assert_eq!(updated.created_by, "admin");
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(updated.credential_set().secret_key, created.credential_set().secret_key);
    }

    #[tokio::test]
    async fn rotate_replaces_the_whole_triple() {
        let repo = InMemoryClientConfigRepository::new();
        let created = repo.create(new_config("AHIS", 1, ConfigStatus::Active)).await.unwrap();

        let fresh = CredentialSet {
            secret_key: SecretString::new("sk-new"),
            access_token: SecretString::new("at-new"),
            shared_key: SecretString::new("shk-new"),
        };
        let rotated = repo.rotate_secrets(created.id, fresh, "rotator").await.unwrap();

        assert_eq!(rotated.client_secret_key.expose_secret(), "sk-new");
        assert_eq!(rotated.client_access_token.expose_secret(), "at-new");
        assert_eq!(rotated.client_shared_key.expose_secret(), "shk-new");
        assert_eq!(rotated.client_id, created.client_id);
        assert_eq!(rotated.created_at, created.created_at);
        assert!(rotated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn delete_is_idempotent_failure() {
        let repo = InMemoryClientConfigRepository::new();
        let created = repo.create(new_config("AHIS", 1, ConfigStatus::Active)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, CredplaneError::NotFound { .. }));

        let err = repo.get(created.id).await.unwrap_err();
        assert!(matches!(err, CredplaneError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = InMemoryClientConfigRepository::new();
        for name in ["AHIS", "AHCC", "AHPI"] {
            repo.create(new_config(name, 1, ConfigStatus::Active)).await.unwrap();
        }

        let all = repo.list(&ClientConfigFilter::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|c| c.client_id.as_str()).collect();
        assert_eq!(names, vec!["AHIS", "AHCC", "AHPI"]);
    }

    #[tokio::test]
    async fn counts_track_status() {
        let repo = InMemoryClientConfigRepository::new();
        repo.create(new_config("AHIS", 1, ConfigStatus::Active)).await.unwrap();
        repo.create(new_config("AHCC", 1, ConfigStatus::Inactive)).await.unwrap();
        repo.create(new_config("AHPI", 2, ConfigStatus::Active)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 3);
        assert_eq!(repo.count_active().await.unwrap(), 2);
    }
}
