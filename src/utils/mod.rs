//! Configuration utilities

pub mod config;

pub use config::{BrokerConfig, ConfigError, RelayConfig};
