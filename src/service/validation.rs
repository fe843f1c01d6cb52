//! Validation helpers and request DTOs for client configuration operations.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

lazy_static! {
    static ref CLIENT_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$")
        .expect("CLIENT_ID_REGEX should be a valid regex pattern");
}

/// Create payload for a new client configuration. Secrets are not part of the
/// request; the service generates them. `deny_unknown_fields` rejects any
/// payload that tries to smuggle a secret field in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateClientConfigRequest {
    #[validate(custom(function = "validate_client_id"))]
    pub client_id: String,
    #[validate(range(min = 1, message = "entity_id must be a positive identifier"))]
    pub entity_id: i64,
    /// Lifecycle status as its wire string (`ACTIVE | INACTIVE | PENDING`);
    /// parsed and rejected by the service if outside the enumerated set.
    pub status: String,
}

/// Update payload for an existing configuration. Restricted to the two
/// mutable non-secret fields; a payload carrying any other field (secret
/// fields included) fails deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateClientConfigRequest {
    pub client_id: Option<String>,
    pub status: Option<String>,
}

impl UpdateClientConfigRequest {
    /// True when the request would change nothing.
    pub fn is_noop(&self) -> bool {
        self.client_id.is_none() && self.status.is_none()
    }
}

impl Validate for UpdateClientConfigRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if let Some(client_id) = &self.client_id {
            validate_client_id(client_id).map_err(|err| {
                let mut errors = ValidationErrors::new();
                errors.add("client_id", err);
                errors
            })?;
        }

        if let Some(status) = &self.status {
            if !matches!(status.as_str(), "ACTIVE" | "INACTIVE" | "PENDING") {
                let mut errors = ValidationErrors::new();
                errors.add("status", ValidationError::new("invalid_status"));
                return Err(errors);
            }
        }

        Ok(())
    }
}

pub fn validate_client_id(client_id: &str) -> Result<(), ValidationError> {
    if CLIENT_ID_REGEX.is_match(client_id) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_client_id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_validation_allows_sample_identifiers() {
        assert!(validate_client_id("AHIS").is_ok());
        assert!(validate_client_id("mobile_client_002").is_ok());
        assert!(validate_client_id("a").is_ok());
        assert!(validate_client_id("").is_err());
        assert!(validate_client_id("has space").is_err());
        assert!(validate_client_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn create_request_validation() {
        let request = CreateClientConfigRequest {
            client_id: "ACME".into(),
            entity_id: 7,
            status: "PENDING".into(),
        };
        assert!(request.validate().is_ok());

        let bad_entity = CreateClientConfigRequest { entity_id: 0, ..request.clone() };
        assert!(bad_entity.validate().is_err());

        let bad_client = CreateClientConfigRequest { client_id: "".into(), ..request };
        assert!(bad_client.validate().is_err());
    }

    #[test]
    fn update_validation_checks_optional_fields() {
        let mut request = UpdateClientConfigRequest {
            client_id: Some("AHIS".into()),
            status: Some("ACTIVE".into()),
        };
        assert!(request.validate().is_ok());

        request.status = Some("active".into());
        assert!(request.validate().is_err());

        request.status = Some("ACTIVE".into());
        request.client_id = Some("!bad".into());
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_request_rejects_secret_fields_in_payload() {
        let err = serde_json::from_str::<UpdateClientConfigRequest>(
            r#"{"client_id": "AHIS", "client_secret_key": "attacker-chosen"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("client_secret_key"));
    }

    #[test]
    fn create_request_rejects_secret_fields_in_payload() {
        assert!(serde_json::from_str::<CreateClientConfigRequest>(
            r#"{"client_id": "AHIS", "entity_id": 1, "status": "ACTIVE", "client_shared_key": "x"}"#,
        )
        .is_err());
    }
}
