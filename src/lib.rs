//! GNSS relay
//!
//! Polls the local GNSS modem service over D-Bus, normalizes its loosely-typed
//! reply into a fixed-shape record and publishes it as JSON to an MQTT broker.

pub mod core;
pub mod source;
pub mod processing;
pub mod publish;
pub mod service;
pub mod utils;
pub mod logging;
pub mod error;

// Re-export commonly used types
pub use self::core::{
    BeidouSatelliteEntry, FullPositionRecord, PublishableRecord, SatelliteEntry, UtcTimestamp,
    MAX_SATELLITE_COUNT,
};
pub use error::RelayError;
pub use processing::{decode, CoerceError};
pub use publish::{MqttSink, PublishError, PublishSink, Publisher};
pub use service::{AcquisitionLoop, LoopStats};
pub use source::{AcquireError, DbusPositionSource, PositionSource, RawRecord, RawValue};
pub use utils::{BrokerConfig, ConfigError, RelayConfig};
