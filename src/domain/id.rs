//! NewType wrapper for client configuration identifiers.
//!
//! Identifiers are assigned by the store on creation, are immutable, and are
//! never reused after deletion within a process lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe identifier for a [`crate::domain::ClientConfig`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ConfigId(i64);

impl ConfigId {
    /// Wrap an identifier produced by the store.
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner integer value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConfigId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for ConfigId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ConfigId> for i64 {
    fn from(id: ConfigId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_id_round_trip() {
        let id = ConfigId::from_i64(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<ConfigId>().unwrap(), id);
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn config_id_rejects_garbage() {
        assert!("not-a-number".parse::<ConfigId>().is_err());
    }
}
