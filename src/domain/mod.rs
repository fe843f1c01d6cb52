//! Domain model for client configurations.

mod client_config;
mod id;

pub use client_config::{
    ClientConfig, ClientConfigFilter, ConfigStatus, ConfigStatusParseError, NewClientConfig,
    UpdateClientConfig,
};
pub use id::ConfigId;
