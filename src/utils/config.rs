//! Relay configuration loaded once from the process environment

use crate::core::DEFAULT_POLL_INTERVAL;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const ENV_BROKER_URL: &str = "MQTT_BROKER_URL";
pub const ENV_BROKER_PORT: &str = "MQTT_BROKER_PORT";
pub const ENV_TOPIC: &str = "MQTT_TOPIC";
pub const ENV_USERNAME: &str = "MQTT_USERNAME";
pub const ENV_PASSWORD: &str = "MQTT_PASSWORD";
pub const ENV_CLIENT_ID: &str = "MQTT_CLIENT_ID";
pub const ENV_KEEP_ALIVE_SECS: &str = "MQTT_KEEP_ALIVE_SECS";
pub const ENV_POLL_INTERVAL_SECS: &str = "GNSS_POLL_INTERVAL_SECS";

const DEFAULT_CLIENT_ID: &str = "gnss-relay";
const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(30);

/// Configuration errors; all of them are fatal at startup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {parameter}")]
    MissingParameter { parameter: String },
    #[error("invalid {parameter} = {value:?}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

/// Broker connection settings
#[derive(Clone, PartialEq)]
pub struct BrokerConfig {
    /// Broker host name, without scheme or port
    pub host: String,
    pub port: u16,
    /// Base topic; records go to `<base_topic>/gnss`
    pub base_topic: String,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub keep_alive: Duration,
}

impl fmt::Debug for BrokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_topic", &self.base_topic)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("keep_alive", &self.keep_alive)
            .finish()
    }
}

/// Complete relay configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub broker: BrokerConfig,
    /// Interval between acquisitions
    pub poll_interval: Duration,
}

impl RelayConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    ///
    /// Values are trimmed and an empty value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| ConfigError::MissingParameter {
                parameter: key.to_string(),
            })
        };

        let port_text = require(ENV_BROKER_PORT)?;
        let host = require(ENV_BROKER_URL)?;
        let base_topic = require(ENV_TOPIC)?;
        let username = require(ENV_USERNAME)?;
        let password = require(ENV_PASSWORD)?;

        let port = parse_port(&port_text)?;
        let client_id = get(ENV_CLIENT_ID).unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        let keep_alive = match get(ENV_KEEP_ALIVE_SECS) {
            Some(text) => parse_seconds(ENV_KEEP_ALIVE_SECS, &text)?,
            None => DEFAULT_KEEP_ALIVE,
        };
        let poll_interval = match get(ENV_POLL_INTERVAL_SECS) {
            Some(text) => parse_seconds(ENV_POLL_INTERVAL_SECS, &text)?,
            None => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            broker: BrokerConfig {
                host: strip_scheme(&host).to_string(),
                port,
                base_topic,
                username,
                password,
                client_id,
                keep_alive,
            },
            poll_interval,
        })
    }
}

fn parse_port(text: &str) -> Result<u16, ConfigError> {
    match text.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidParameter {
            parameter: ENV_BROKER_PORT.to_string(),
            value: text.to_string(),
            reason: "expected a port number between 1 and 65535".to_string(),
        }),
    }
}

fn parse_seconds(parameter: &str, text: &str) -> Result<Duration, ConfigError> {
    match text.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: text.to_string(),
            reason: "expected a positive number of seconds".to_string(),
        }),
    }
}

/// Accept `ssl://host` and `mqtts://host` as well as a bare host
fn strip_scheme(host: &str) -> &str {
    host.split_once("://").map_or(host, |(_, rest)| rest)
}
