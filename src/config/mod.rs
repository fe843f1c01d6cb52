//! # Configuration Management
//!
//! Configuration for the credplane core: database pool settings, observability
//! knobs, and the secret length policy. Values come from environment variables
//! (with `.env` support via dotenvy) and are validated with the `validator`
//! crate before use.

use crate::errors::{CredplaneError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,

    /// Secret generation policy
    #[validate(nested)]
    pub secrets: SecretPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables, reading a `.env` file
    /// if one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database: DatabaseConfig::from_env(),
            observability: ObservabilityConfig::from_env(),
            secrets: SecretPolicy::from_env()?,
        };
        config.validate_all()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(CredplaneError::from)?;

        if !self.database.url.starts_with("sqlite://") {
            return Err(CredplaneError::validation("Database URL must start with 'sqlite://'"));
        }

        Ok(())
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum number of connections in the pool
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[validate(range(max = 50, message = "Min connections must be between 0 and 50"))]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds; bounds every store operation so
    /// a saturated pool surfaces as an error instead of hanging callers
    #[validate(range(
        min = 1,
        max = 60,
        message = "Connect timeout must be between 1 and 60 seconds"
    ))]
    pub connect_timeout_seconds: u64,

    /// Idle timeout in seconds (0 = no timeout)
    pub idle_timeout_seconds: u64,

    /// Enable automatic migrations
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/credplane.db".to_string(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 600, // 10 minutes
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Get idle timeout as Duration (None if 0)
    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_seconds))
        }
    }

    /// Create DatabaseConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: std::env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: env_parse("DATABASE_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_seconds: env_parse(
                "DATABASE_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            ),
            idle_timeout_seconds: env_parse(
                "DATABASE_IDLE_TIMEOUT_SECONDS",
                defaults.idle_timeout_seconds,
            ),
            auto_migrate: std::env::var("DATABASE_AUTO_MIGRATE")
                .map(|s| s.to_lowercase() == "true" || s == "1")
                .unwrap_or(defaults.auto_migrate),
        }
    }
}

/// Observability configuration for logging and metrics
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Enable metrics collection
    pub enable_metrics: bool,

    /// Tracing service name
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enable_metrics: true,
            service_name: "credplane".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enable_metrics: std::env::var("CREDPLANE_ENABLE_METRICS")
                .map(|s| s.to_lowercase() == "true" || s == "1")
                .unwrap_or(defaults.enable_metrics),
            service_name: std::env::var("CREDPLANE_SERVICE_NAME")
                .unwrap_or(defaults.service_name),
            log_level: std::env::var("CREDPLANE_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logging: std::env::var("CREDPLANE_JSON_LOGGING")
                .map(|s| s.to_lowercase() == "true" || s == "1")
                .unwrap_or(defaults.json_logging),
        }
    }
}

/// Lengths of the generated secret fields. These are policy constants owned by
/// the deployment, not by the generator itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct SecretPolicy {
    /// Length of `client_secret_key`
    #[validate(range(min = 1, max = 512, message = "Secret key length must be 1..=512"))]
    pub secret_key_length: usize,

    /// Length of `client_access_token`
    #[validate(range(min = 1, max = 512, message = "Access token length must be 1..=512"))]
    pub access_token_length: usize,

    /// Length of `client_shared_key`
    #[validate(range(min = 1, max = 512, message = "Shared key length must be 1..=512"))]
    pub shared_key_length: usize,
}

impl Default for SecretPolicy {
    fn default() -> Self {
        Self { secret_key_length: 32, access_token_length: 48, shared_key_length: 24 }
    }
}

impl SecretPolicy {
    /// Create SecretPolicy from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let policy = Self {
            secret_key_length: env_parse("CREDPLANE_SECRET_KEY_LENGTH", defaults.secret_key_length),
            access_token_length: env_parse(
                "CREDPLANE_ACCESS_TOKEN_LENGTH",
                defaults.access_token_length,
            ),
            shared_key_length: env_parse(
                "CREDPLANE_SHARED_KEY_LENGTH",
                defaults.shared_key_length,
            ),
        };
        policy.validate().map_err(CredplaneError::from)?;
        Ok(policy)
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|s| s.parse::<T>().ok()).unwrap_or(default)
}
