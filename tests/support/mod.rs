//! Shared harness for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use credplane::config::SecretPolicy;
use credplane::domain::ClientConfig;
use credplane::service::{ClientConfigService, CreateClientConfigRequest};
use credplane::storage::{InMemoryAuditLog, InMemoryClientConfigRepository};

pub const ACTOR: &str = "admin";

pub struct TestHarness {
    pub service: ClientConfigService,
    pub audit_log: Arc<InMemoryAuditLog>,
}

pub fn setup_service() -> TestHarness {
    let repository = Arc::new(InMemoryClientConfigRepository::new());
    let audit_log = Arc::new(InMemoryAuditLog::new());
    let service =
        ClientConfigService::new(repository, audit_log.clone(), SecretPolicy::default());
    TestHarness { service, audit_log }
}

pub fn create_request(client_id: &str, entity_id: i64, status: &str) -> CreateClientConfigRequest {
    CreateClientConfigRequest {
        client_id: client_id.to_string(),
        entity_id,
        status: status.to_string(),
    }
}

impl TestHarness {
    /// Seed the population from the reference sample data: duplicate
    /// client_ids across entities are intentional.
    pub async fn seed_sample_configs(&self) -> Vec<ClientConfig> {
        let mut seeded = Vec::new();
        for (client_id, entity_id, status) in [
            ("AHIS", 1, "ACTIVE"),
            ("AHCC", 1, "ACTIVE"),
            ("AHIS", 2, "INACTIVE"),
            ("AHPI", 2, "PENDING"),
            ("mobile_client_002", 3, "ACTIVE"),
        ] {
            let config = self
                .service
                .create_config(create_request(client_id, entity_id, status), ACTOR)
                .await
                .expect("seed config");
            seeded.push(config);
        }
        seeded
    }
}
