//! Disclosure policy: the presentation transform between stored secrets and
//! what a caller sees.
//!
//! Records always carry full secret values across the trusted boundary;
//! masking happens here, at the final serialization edge. A hidden field
//! renders as a fixed-width mask regardless of the secret's true length, so
//! the masked form carries no length side-channel. A field is revealed only
//! in direct response to an explicit per-field request.

use serde::Serialize;

use crate::domain::{ClientConfig, ConfigId, ConfigStatus};
use crate::secrets::SecretString;

/// Fixed-width mask used for hidden secret fields.
pub const MASK: &str = "••••••••••••";

/// Per-field reveal intent. Defaults to everything hidden; list responses
/// should always use the default.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DisclosureRequest {
    pub reveal_secret_key: bool,
    pub reveal_access_token: bool,
    pub reveal_shared_key: bool,
}

impl DisclosureRequest {
    /// Reveal all three fields. For single-record reveal actions only.
    pub fn reveal_all() -> Self {
        Self { reveal_secret_key: true, reveal_access_token: true, reveal_shared_key: true }
    }
}

/// Display representation of a client configuration with the disclosure
/// policy already applied. Unlike [`ClientConfig`], the secret fields here are
/// plain strings; by construction they hold either the fixed mask or a value
/// the caller explicitly asked for.
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfigView {
    pub id: ConfigId,
    pub client_id: String,
    pub client_secret_key: String,
    pub client_access_token: String,
    pub client_shared_key: String,
    pub status: ConfigStatus,
    pub entity_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// Apply the disclosure policy to a stored record.
pub fn disclose(config: &ClientConfig, request: &DisclosureRequest) -> ClientConfigView {
    ClientConfigView {
        id: config.id,
        client_id: config.client_id.clone(),
        client_secret_key: render(&config.client_secret_key, request.reveal_secret_key),
        client_access_token: render(&config.client_access_token, request.reveal_access_token),
        client_shared_key: render(&config.client_shared_key, request.reveal_shared_key),
        status: config.status,
        entity_id: config.entity_id,
        created_at: config.created_at,
        updated_at: config.updated_at,
        created_by: config.created_by.clone(),
        updated_by: config.updated_by.clone(),
    }
}

fn render(secret: &SecretString, reveal: bool) -> String {
    if reveal {
        secret.expose_secret().to_string()
    } else {
        MASK.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_config() -> ClientConfig {
        let now = Utc::now();
        ClientConfig {
            id: ConfigId::from_i64(1),
            client_id: "AHIS".into(),
            client_secret_key: SecretString::new("secret-key-value-0123456789abcdef"),
            client_access_token: SecretString::new("access-token-value"),
            client_shared_key: SecretString::new("shk"),
            status: ConfigStatus::Active,
            entity_id: 1,
            created_at: now,
            updated_at: now,
            created_by: "admin".into(),
            updated_by: "admin".into(),
        }
    }

    #[test]
    fn default_request_masks_everything() {
        let view = disclose(&sample_config(), &DisclosureRequest::default());
        assert_eq!(view.client_secret_key, MASK);
        assert_eq!(view.client_access_token, MASK);
        assert_eq!(view.client_shared_key, MASK);
    }

    #[test]
    fn mask_width_is_independent_of_secret_length() {
        let view = disclose(&sample_config(), &DisclosureRequest::default());
        // 33-char and 3-char secrets render identically
        assert_eq!(view.client_secret_key.chars().count(), view.client_shared_key.chars().count());
        assert_eq!(view.client_shared_key.chars().count(), 12);
    }

    #[test]
    fn reveal_is_per_field() {
        let request = DisclosureRequest { reveal_access_token: true, ..Default::default() };
        let view = disclose(&sample_config(), &request);
        assert_eq!(view.client_secret_key, MASK);
        assert_eq!(view.client_access_token, "access-token-value");
        assert_eq!(view.client_shared_key, MASK);
    }

    #[test]
    fn reveal_all_exposes_true_values() {
        let view = disclose(&sample_config(), &DisclosureRequest::reveal_all());
        assert_eq!(view.client_secret_key, "secret-key-value-0123456789abcdef");
        assert_eq!(view.client_shared_key, "shk");
    }

    #[test]
    fn view_serializes_masked_values() {
        let view = disclose(&sample_config(), &DisclosureRequest::default());
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains(MASK));
        assert!(!json.contains("access-token-value"));
    }
}
