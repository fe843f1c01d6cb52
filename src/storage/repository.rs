//! Repository contract for the credential record store.

use async_trait::async_trait;

use crate::domain::{ClientConfig, ClientConfigFilter, ConfigId, NewClientConfig, UpdateClientConfig};
use crate::errors::Result;
use crate::secrets::CredentialSet;

/// Durable keyed storage of client configuration records.
///
/// Implementations must serialize mutations to a single record: a reader never
/// observes a record mid-mutation, and concurrent rotations (or a rotation
/// racing an update) never interleave partial writes. Each method is one
/// atomic unit; there is no cross-record locking requirement.
#[async_trait]
pub trait ClientConfigRepository: Send + Sync {
    /// Persist a new record, assigning a fresh id and stamping both timestamp
    /// pairs from the same clock reading. Ids are never reused within a
    /// process lifetime, including after deletion.
    async fn create(&self, new: NewClientConfig) -> Result<ClientConfig>;

    /// Fetch one record, or `NotFound`. Never returns a partial record.
    async fn get(&self, id: ConfigId) -> Result<ClientConfig>;

    /// List records matching the filter, in insertion order. Read-only.
    async fn list(&self, filter: &ClientConfigFilter) -> Result<Vec<ClientConfig>>;

    /// Update the mutable non-secret fields, bumping `updated_at`/`updated_by`.
    async fn update_metadata(
        &self,
        id: ConfigId,
        update: UpdateClientConfig,
        actor: &str,
    ) -> Result<ClientConfig>;

    /// Replace all three secret fields as one atomic write, bumping
    /// `updated_at`/`updated_by` and leaving every other field untouched.
    async fn rotate_secrets(
        &self,
        id: ConfigId,
        credentials: CredentialSet,
        actor: &str,
    ) -> Result<ClientConfig>;

    /// Hard-delete the record. Repeat deletes of the same id report
    /// `NotFound`, never silent success.
    async fn delete(&self, id: ConfigId) -> Result<()>;

    /// Total number of records.
    async fn count(&self) -> Result<i64>;

    /// Number of records with `ACTIVE` status.
    async fn count_active(&self) -> Result<i64>;
}
