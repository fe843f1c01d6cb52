//! Data models for the client configuration credential system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::ConfigId;
use crate::secrets::{CredentialSet, SecretString};

/// Lifecycle status for a client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigStatus {
    Active,
    Inactive,
    Pending,
}

impl ConfigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigStatus::Active => "ACTIVE",
            ConfigStatus::Inactive => "INACTIVE",
            ConfigStatus::Pending => "PENDING",
        }
    }
}

impl Display for ConfigStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConfigStatus {
    type Err = ConfigStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(ConfigStatus::Active),
            "INACTIVE" => Ok(ConfigStatus::Inactive),
            "PENDING" => Ok(ConfigStatus::Pending),
            other => Err(ConfigStatusParseError(other.to_string())),
        }
    }
}

/// Error returned when status parsing fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid config status: {0}")]
pub struct ConfigStatusParseError(pub String);

/// Stored representation of a client configuration: a client identifier, its
/// three rotatable secret credentials, a lifecycle status, and audit metadata.
///
/// Secret fields are [`SecretString`]s, redacted in `Debug`/`Display` and in
/// default serialization, so a full record can flow through logs and list
/// responses without disclosing credential material. Disclosure is an explicit
/// transform (see [`crate::secrets::disclosure`]).
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfig {
    pub id: ConfigId,
    /// Caller-supplied identifier. Uniqueness is unconstrained: the same
    /// client_id may appear under several entities, or twice under one.
    pub client_id: String,
    pub client_secret_key: SecretString,
    pub client_access_token: SecretString,
    pub client_shared_key: SecretString,
    pub status: ConfigStatus,
    pub entity_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

impl ClientConfig {
    /// The current secret triple, cloned as a unit. Useful for asserting
    /// rotation atomicity: the triple either matches a pre-rotation snapshot
    /// completely or not at all.
    pub fn credential_set(&self) -> CredentialSet {
        CredentialSet {
            secret_key: self.client_secret_key.clone(),
            access_token: self.client_access_token.clone(),
            shared_key: self.client_shared_key.clone(),
        }
    }
}

/// New record payload handed to the store. Secrets are already generated by
/// the service layer; the store only persists and stamps timestamps/ids.
#[derive(Debug, Clone)]
pub struct NewClientConfig {
    pub client_id: String,
    pub entity_id: i64,
    pub status: ConfigStatus,
    pub credentials: CredentialSet,
    pub created_by: String,
}

/// Update payload for an existing record. Restricted to the two mutable
/// non-secret fields; secrets change only through rotation.
#[derive(Debug, Clone, Default)]
pub struct UpdateClientConfig {
    pub client_id: Option<String>,
    pub status: Option<ConfigStatus>,
}

/// Listing predicates, AND-composed. An empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfigFilter {
    /// Exact match on the owning entity
    pub entity_id: Option<i64>,
    /// Exact match on lifecycle status
    pub status: Option<ConfigStatus>,
    /// Case-insensitive substring match against `client_id`
    pub search: Option<String>,
    /// Reserved for multi-tenant scoping. Entities are tenant-scoped by an
    /// external system and this core has no entity-to-tenant mapping, so the
    /// field is accepted but has no effect on results.
    pub tenant_id: Option<i64>,
}

impl ClientConfigFilter {
    /// True when the record satisfies every present predicate.
    pub fn matches(&self, config: &ClientConfig) -> bool {
        if let Some(entity_id) = self.entity_id {
            if config.entity_id != entity_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if config.status != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !config.client_id.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// True when no predicate is present (tenant_id aside, which never
    /// narrows results).
    pub fn is_empty(&self) -> bool {
        self.entity_id.is_none() && self.status.is_none() && self.search.is_none()
    }
}
