//! Positioning service interface trait

use crate::source::{AcquireResult, RawRecord};
use std::future::Future;

/// Abstraction over the local service that yields raw positioning records
///
/// Implementations are called by a single task, one request at a time.
pub trait PositionSource: Send {
    /// Request the current positioning record
    ///
    /// Returns `Err` when the call cannot be completed; the caller skips the
    /// tick and tries again on the next one.
    fn acquire(&mut self) -> impl Future<Output = AcquireResult<RawRecord>> + Send;

    /// Human-readable identifier used in log output
    fn name(&self) -> &str;
}
