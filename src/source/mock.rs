//! Mock position source for testing and development

use crate::source::{AcquireError, AcquireResult, PositionSource, RawRecord};
use std::collections::VecDeque;

/// Scripted position source
///
/// Replies are served in the order they were queued. An empty queue answers
/// with [`AcquireError::Unavailable`].
pub struct MockPositionSource {
    name: String,
    replies: VecDeque<AcquireResult<RawRecord>>,
}

impl MockPositionSource {
    pub fn new() -> Self {
        Self {
            name: "mock-gnss".to_string(),
            replies: VecDeque::new(),
        }
    }

    /// Queue a successful reply
    pub fn push_record(&mut self, record: RawRecord) {
        self.replies.push_back(Ok(record));
    }

    /// Queue a failed reply
    pub fn push_failure(&mut self, error: AcquireError) {
        self.replies.push_back(Err(error));
    }
}

impl Default for MockPositionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionSource for MockPositionSource {
    async fn acquire(&mut self) -> AcquireResult<RawRecord> {
        self.replies.pop_front().unwrap_or_else(|| {
            Err(AcquireError::Unavailable {
                reason: "no reply queued".to_string(),
            })
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
