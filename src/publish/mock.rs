//! In-memory publish sink for tests and dry runs

use crate::publish::{PublishError, PublishResult, PublishSink};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A message captured by [`MockPublishSink`]
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Publish sink recording every payload
///
/// Clones share the same log, so a test can keep one handle while the
/// publisher owns another.
#[derive(Debug, Clone, Default)]
pub struct MockPublishSink {
    published: Arc<Mutex<Vec<PublishedMessage>>>,
    failures_pending: Arc<AtomicU32>,
    closed: Arc<AtomicBool>,
}

impl MockPublishSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` publish calls fail with a transport error
    pub fn fail_next(&self, count: u32) {
        self.failures_pending.store(count, Ordering::SeqCst);
    }

    /// Snapshot of everything published so far
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.failures_pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl PublishSink for MockPublishSink {
    async fn publish(&mut self, topic: &str, payload: Vec<u8>) -> PublishResult<()> {
        if self.is_closed() || self.take_failure() {
            return Err(PublishError::Transport {
                topic: topic.to_string(),
                details: "simulated broker failure".to_string(),
            });
        }

        if let Ok(mut messages) = self.published.lock() {
            messages.push(PublishedMessage {
                topic: topic.to_string(),
                payload,
            });
        }
        Ok(())
    }

    async fn shutdown(self, _grace: Duration) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

