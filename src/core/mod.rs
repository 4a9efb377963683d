//! Core types and constants for the GNSS relay

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
