//! SQLite-backed implementation of the credential record store.
//!
//! Secret columns hold the values as handed over by the service; at-rest
//! protection is the deployment's key-management layer (filesystem or page
//! encryption), not this module. Rotation writes all three secret columns in
//! one UPDATE so concurrent readers see the old or the new triple, never a
//! mixture.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;

use crate::domain::{
    ClientConfig, ClientConfigFilter, ConfigId, ConfigStatus, NewClientConfig, UpdateClientConfig,
};
use crate::errors::{CredplaneError, Result};
use crate::secrets::{CredentialSet, SecretString};
use crate::storage::{ClientConfigRepository, DbPool};

const RESOURCE: &str = "client_config";

#[derive(Debug, Clone, FromRow)]
struct ClientConfigRow {
    pub id: i64,
    pub client_id: String,
    pub client_secret_key: String,
    pub client_access_token: String,
    pub client_shared_key: String,
    pub status: String,
    pub entity_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

const SELECT_COLUMNS: &str = "id, client_id, client_secret_key, client_access_token, \
     client_shared_key, status, entity_id, created_at, updated_at, created_by, updated_by";

fn to_model(row: ClientConfigRow) -> Result<ClientConfig> {
    let status = ConfigStatus::from_str(&row.status).map_err(|_| {
        CredplaneError::validation(format!(
            "Unknown config status '{}' for record {}",
            row.status, row.id
        ))
    })?;

    Ok(ClientConfig {
        id: ConfigId::from_i64(row.id),
        client_id: row.client_id,
        client_secret_key: SecretString::new(row.client_secret_key),
        client_access_token: SecretString::new(row.client_access_token),
        client_shared_key: SecretString::new(row.client_shared_key),
        status,
        entity_id: row.entity_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        created_by: row.created_by,
        updated_by: row.updated_by,
    })
}

/// Credential record store over a sqlx SQLite pool.
#[derive(Debug, Clone)]
pub struct SqlxClientConfigRepository {
    pool: DbPool,
}

impl SqlxClientConfigRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: ConfigId) -> Result<ClientConfig> {
        let row: ClientConfigRow = sqlx::query_as(&format!(
            "SELECT {} FROM client_configs WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to fetch client configuration".to_string(),
        })?
        .ok_or_else(|| CredplaneError::not_found(RESOURCE, id))?;

        to_model(row)
    }
}

#[async_trait]
impl ClientConfigRepository for SqlxClientConfigRepository {
    async fn create(&self, new: NewClientConfig) -> Result<ClientConfig> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO client_configs (client_id, client_secret_key, client_access_token, \
             client_shared_key, status, entity_id, created_at, updated_at, created_by, updated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8, $8)",
        )
        .bind(&new.client_id)
        .bind(new.credentials.secret_key.expose_secret())
        .bind(new.credentials.access_token.expose_secret())
        .bind(new.credentials.shared_key.expose_secret())
        .bind(new.status.as_str())
        .bind(new.entity_id)
        .bind(now)
        .bind(&new.created_by)
        .execute(&self.pool)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to insert client configuration".to_string(),
        })?;

        self.fetch(ConfigId::from_i64(result.last_insert_rowid())).await
    }

    async fn get(&self, id: ConfigId) -> Result<ClientConfig> {
        self.fetch(id).await
    }

    async fn list(&self, filter: &ClientConfigFilter) -> Result<Vec<ClientConfig>> {
        let rows: Vec<ClientConfigRow> = sqlx::query_as(&format!(
            "SELECT {} FROM client_configs \
             WHERE ($1 IS NULL OR entity_id = $1) \
               AND ($2 IS NULL OR status = $2) \
               AND ($3 IS NULL OR instr(lower(client_id), lower($3)) > 0) \
             ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .bind(filter.entity_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.search.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to list client configurations".to_string(),
        })?;

        rows.into_iter().map(to_model).collect()
    }

    async fn update_metadata(
        &self,
        id: ConfigId,
        update: UpdateClientConfig,
        actor: &str,
    ) -> Result<ClientConfig> {
        let mut tx = self.pool.begin().await.map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to begin transaction for config update".to_string(),
        })?;

        let existing: ClientConfigRow = sqlx::query_as(&format!(
            "SELECT {} FROM client_configs WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to fetch client configuration".to_string(),
        })?
        .ok_or_else(|| CredplaneError::not_found(RESOURCE, id))?;

        let client_id = update.client_id.unwrap_or(existing.client_id);
        let status = match update.status {
            Some(status) => status.as_str().to_string(),
            None => existing.status,
        };

        sqlx::query(
            "UPDATE client_configs SET client_id = $1, status = $2, updated_at = $3, \
             updated_by = $4 WHERE id = $5",
        )
        .bind(&client_id)
        .bind(&status)
        .bind(Utc::now())
        .bind(actor)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to update client configuration".to_string(),
        })?;

        tx.commit().await.map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to commit config update".to_string(),
        })?;

        self.fetch(id).await
    }

    async fn rotate_secrets(
        &self,
        id: ConfigId,
        credentials: CredentialSet,
        actor: &str,
    ) -> Result<ClientConfig> {
        let result = sqlx::query(
            "UPDATE client_configs SET client_secret_key = $1, client_access_token = $2, \
             client_shared_key = $3, updated_at = $4, updated_by = $5 WHERE id = $6",
        )
        .bind(credentials.secret_key.expose_secret())
        .bind(credentials.access_token.expose_secret())
        .bind(credentials.shared_key.expose_secret())
        .bind(Utc::now())
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| CredplaneError::Database {
            source: err,
            context: "Failed to rotate client configuration secrets".to_string(),
        })?;

        if result.rows_affected() == 0 {
            return Err(CredplaneError::not_found(RESOURCE, id));
        }

        self.fetch(id).await
    }

    async fn delete(&self, id: ConfigId) -> Result<()> {
        let result = sqlx::query("DELETE FROM client_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| CredplaneError::Database {
                source: err,
                context: "Failed to delete client configuration".to_string(),
            })?;

        if result.rows_affected() == 0 {
            return Err(CredplaneError::not_found(RESOURCE, id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM client_configs")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| CredplaneError::Database {
                source: err,
                context: "Failed to count client configurations".to_string(),
            })?;
        Ok(count)
    }

    async fn count_active(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM client_configs WHERE status = 'ACTIVE'")
                .fetch_one(&self.pool)
                .await
                .map_err(|err| CredplaneError::Database {
                    source: err,
                    context: "Failed to count active client configurations".to_string(),
                })?;
        Ok(count)
    }
}
