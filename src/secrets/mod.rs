//! Secret material handling: generation, in-memory protection, and
//! controlled disclosure.
//!
//! Stored secrets live in [`SecretString`] wrappers that redact themselves in
//! `Debug`, `Display`, and default serialization, and zero their memory on
//! drop. Fresh material comes from [`SecretGenerator`], which draws from the
//! operating system CSPRNG. Showing a secret to a caller goes through
//! [`disclosure`], which is the only place a stored value becomes plain text.

pub mod disclosure;
pub mod generator;
pub mod types;

pub use disclosure::{disclose, ClientConfigView, DisclosureRequest, MASK};
pub use generator::{CredentialSet, SecretGenerator};
pub use types::SecretString;
