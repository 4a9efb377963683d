//! Publish capability trait

use crate::publish::PublishResult;
use std::future::Future;
use std::time::Duration;

/// Transport able to deliver a payload on a topic
///
/// Connection management, TLS and reconnects belong to the implementation.
pub trait PublishSink: Send {
    /// Deliver one payload; no retry is attempted on failure
    fn publish(&mut self, topic: &str, payload: Vec<u8>) -> impl Future<Output = PublishResult<()>> + Send;

    /// Close the transport, giving pending messages at most `grace` to flush
    fn shutdown(self, grace: Duration) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}
