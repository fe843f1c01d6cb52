//! Cryptographically secure generation of credential material.

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::config::SecretPolicy;
use crate::errors::{CredplaneError, Result};
use crate::secrets::SecretString;

/// The three secret fields of a client configuration, generated together so
/// create and rotate always install a complete triple.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub secret_key: SecretString,
    pub access_token: SecretString,
    pub shared_key: SecretString,
}

/// Produces alphanumeric secret strings from the operating system CSPRNG.
///
/// The generator is pure apart from its randomness source: no state, no side
/// effects. Lengths are supplied by the caller ([`SecretPolicy`] owns the
/// per-field defaults), so deployments can tune them without touching this
/// code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretGenerator;

impl SecretGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a secret of exactly `length` characters drawn uniformly from
    /// `[A-Za-z0-9]`. A zero length is an input-validation error.
    pub fn generate(&self, length: usize) -> Result<SecretString> {
        if length == 0 {
            return Err(CredplaneError::validation_field(
                "Secret length must be greater than zero",
                "length",
            ));
        }

        let value: String = OsRng.sample_iter(&Alphanumeric).take(length).map(char::from).collect();
        Ok(SecretString::new(value))
    }

    /// Generate a fresh credential triple at the policy lengths.
    pub fn generate_credential_set(&self, policy: &SecretPolicy) -> Result<CredentialSet> {
        Ok(CredentialSet {
            secret_key: self.generate(policy.secret_key_length)?,
            access_token: self.generate(policy.access_token_length)?,
            shared_key: self.generate(policy.shared_key_length)?,
        })
    }
}
