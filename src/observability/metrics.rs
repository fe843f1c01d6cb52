//! # Metrics Collection
//!
//! Counters and gauges for credential lifecycle activity, exported through
//! the Prometheus recorder.

use crate::config::ObservabilityConfig;
use crate::errors::{CredplaneError, Result};
use metrics::{counter, describe_counter, describe_gauge, gauge, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder and register metric descriptions.
///
/// Returns a handle whose `render()` output the hosting process can serve
/// from its own scrape endpoint. Returns `None` when metrics are disabled.
pub fn init_metrics(config: &ObservabilityConfig) -> Result<Option<PrometheusHandle>> {
    if !config.enable_metrics {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        CredplaneError::config_with_source("Failed to install Prometheus recorder", Box::new(e))
    })?;

    describe_counter!(
        "client_configs_created_total",
        Unit::Count,
        "Client configurations created"
    );
    describe_counter!(
        "client_configs_updated_total",
        Unit::Count,
        "Client configuration metadata updates"
    );
    describe_counter!(
        "client_config_rotations_total",
        Unit::Count,
        "Credential rotations performed"
    );
    describe_counter!(
        "client_configs_deleted_total",
        Unit::Count,
        "Client configurations deleted"
    );
    describe_gauge!("client_configs_active", "Client configurations with ACTIVE status");

    Ok(Some(handle))
}

pub fn record_config_created() {
    counter!("client_configs_created_total").increment(1);
}

pub fn record_config_updated() {
    counter!("client_configs_updated_total").increment(1);
}

pub fn record_config_rotated() {
    counter!("client_config_rotations_total").increment(1);
}

pub fn record_config_deleted() {
    counter!("client_configs_deleted_total").increment(1);
}

pub fn set_active_configs(count: i64) {
    gauge!("client_configs_active").set(count as f64);
}
