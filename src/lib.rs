//! # Credplane
//!
//! Credplane is the backend core for administering per-client API credential
//! sets ("client configurations"): a client identifier, three rotatable
//! secret artifacts (secret key, access token, shared key), a lifecycle
//! status, and ownership/audit metadata.
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer (external) → ClientConfigService → ClientConfigRepository
//!                                        ↓                      ↓
//!                                 Secret Generator      In-memory / SQLite
//!                                 Disclosure Policy     Audit log
//! ```
//!
//! ## Core Components
//!
//! - **Service layer**: validation, actor stamping, secret issuance, audit
//!   events ([`service::ClientConfigService`])
//! - **Credential record store**: keyed CRUD + filtered listing behind
//!   [`storage::ClientConfigRepository`], with in-memory and sqlx/SQLite
//!   implementations
//! - **Secret generation**: OS-CSPRNG alphanumeric material at policy lengths
//!   ([`secrets::SecretGenerator`])
//! - **Disclosure policy**: masked-by-default presentation of secret fields,
//!   revealed only on explicit per-field request ([`secrets::disclosure`])
//!
//! Authentication of the calling admin is handled upstream; mutating
//! operations take the already-authenticated actor identity as an opaque
//! string for audit stamping.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use credplane::config::SecretPolicy;
//! use credplane::service::{ClientConfigService, CreateClientConfigRequest};
//!
//! #[tokio::main]
//! async fn main() -> credplane::Result<()> {
//!     let service = ClientConfigService::in_memory(SecretPolicy::default());
//!     let config = service
//!         .create_config(
//!             CreateClientConfigRequest {
//!                 client_id: "ACME".into(),
//!                 entity_id: 7,
//!                 status: "PENDING".into(),
//!             },
//!             "admin@example.com",
//!         )
//!         .await?;
//!     let rotated = service.rotate_keys(config.id, "admin@example.com").await?;
//!     assert_eq!(rotated.client_id, "ACME");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod secrets;
pub mod service;
pub mod storage;

// Re-export commonly used types and traits
pub use config::AppConfig;
pub use errors::{CredplaneError, Result};
pub use observability::init_tracing;
pub use service::ClientConfigService;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
