//! Acquisition error types

use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching a raw record from the positioning service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcquireError {
    /// The bus call itself failed (service missing, method error, reply type mismatch)
    #[error("GNSS service call failed: {details}")]
    CallFailed { details: String },
    /// Connection to the bus was lost
    #[error("connection to {service} lost")]
    ConnectionLost { service: String },
    /// The service did not answer in time
    #[error("GNSS service did not answer within {timeout:?}")]
    TimedOut { timeout: Duration },
    /// The service answered but had nothing to report
    #[error("GNSS service unavailable: {reason}")]
    Unavailable { reason: String },
}

impl From<zbus::Error> for AcquireError {
    fn from(error: zbus::Error) -> Self {
        AcquireError::CallFailed {
            details: error.to_string(),
        }
    }
}

/// Result type for acquisition operations
pub type AcquireResult<T> = Result<T, AcquireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AcquireError::ConnectionLost { service: "io.particle.tachyon.GNSS".to_string() };
        assert_eq!(err.to_string(), "connection to io.particle.tachyon.GNSS lost");

        let err = AcquireError::CallFailed { details: "no such method".to_string() };
        assert!(err.to_string().contains("no such method"));

        let err = AcquireError::TimedOut { timeout: Duration::from_secs(5) };
        assert_eq!(err.to_string(), "GNSS service did not answer within 5s");
    }
}
