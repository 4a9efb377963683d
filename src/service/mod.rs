//! Relay service: acquisition loop and lifecycle

pub mod acquisition;
pub mod shutdown;

pub use acquisition::{AcquisitionLoop, LoopState, LoopStats, TickOutcome};
pub use shutdown::spawn_signal_listener;
