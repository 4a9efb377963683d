//! Fatal startup errors

use crate::publish::PublishError;
use crate::source::AcquireError;
use crate::utils::ConfigError;
use thiserror::Error;

/// Failures that stop the relay before the acquisition loop starts
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("environment setup failed: {0}")]
    Config(#[from] ConfigError),
    #[error("MQTT connection error: {0}")]
    Broker(#[from] PublishError),
    #[error("failed to connect to D-Bus: {0}")]
    Bus(#[from] AcquireError),
    #[error("failed to install signal handlers: {0}")]
    Signal(#[from] std::io::Error),
}
