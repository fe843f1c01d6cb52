//! # Observability Infrastructure
//!
//! Structured logging via the tracing ecosystem and Prometheus-style metrics
//! for credential lifecycle activity. Secret values never appear in either:
//! log statements carry record ids and actor names only, and metric labels
//! are static.

pub mod metrics;

pub use metrics::init_metrics;

use crate::config::ObservabilityConfig;
use crate::errors::{CredplaneError, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from the observability configuration.
///
/// `RUST_LOG` takes precedence over the configured log level. Returns an
/// error if a global subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| {
            CredplaneError::config_with_source("Invalid log level directive", Box::new(e))
        })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| {
        CredplaneError::config_with_source("Failed to initialize tracing subscriber", e)
    })?;

    tracing::info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        json_logging = config.json_logging,
        "Tracing initialized"
    );

    Ok(())
}
