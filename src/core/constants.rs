//! Fixed parameters of the positioning record and the relay cadence

use std::time::Duration;

/// Number of slots in every satellite-indexed array of a position record
pub const MAX_SATELLITE_COUNT: usize = 12;

/// Number of positional values in the `utc` block (year, month, day, hour, minute, second)
pub const UTC_FIELD_COUNT: usize = 6;

/// Number of positional values in one satellite tuple (number, elevation, azimuth, SNR)
pub const SATELLITE_TUPLE_LEN: usize = 4;

/// Default interval between two acquisitions
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Upper bound on one call to the positioning service
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Time an in-flight publish is given to flush when the relay shuts down
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(250);

/// Suffix appended to the configured base topic
pub const GNSS_TOPIC_SUFFIX: &str = "gnss";
