//! Publish error types

use thiserror::Error;

/// Errors raised while handing a record to the broker
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PublishError {
    /// The record could not be turned into a JSON payload
    #[error("failed to serialize GNSS payload: {details}")]
    Serialization { details: String },
    /// The transport refused or dropped the message
    #[error("failed to publish to {topic}: {details}")]
    Transport { topic: String, details: String },
    /// Broker connection could not be established at startup
    #[error("broker connection failed: {details}")]
    Connection { details: String },
}

impl From<serde_json::Error> for PublishError {
    fn from(error: serde_json::Error) -> Self {
        PublishError::Serialization {
            details: error.to_string(),
        }
    }
}

/// Result type for publish operations
pub type PublishResult<T> = Result<T, PublishError>;
