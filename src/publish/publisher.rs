//! Publisher adapter: record projection, JSON encoding and topic routing

use crate::core::{FullPositionRecord, PublishableRecord, GNSS_TOPIC_SUFFIX};
use crate::publish::{PublishResult, PublishSink};
use std::time::Duration;
use tracing::debug;

/// Build the GNSS topic below a configured base topic
pub fn gnss_topic(base_topic: &str) -> String {
    format!("{}/{}", base_topic.trim_end_matches('/'), GNSS_TOPIC_SUFFIX)
}

/// Encode the published projection of a record as compact JSON
pub fn encode_payload(record: &FullPositionRecord) -> PublishResult<Vec<u8>> {
    let payload = serde_json::to_vec(&PublishableRecord::from(record))?;
    Ok(payload)
}

/// Serializes decoded records and forwards them to a [`PublishSink`]
pub struct Publisher<P: PublishSink> {
    sink: P,
    topic: String,
}

impl<P: PublishSink> Publisher<P> {
    pub fn new(sink: P, base_topic: &str) -> Self {
        Self {
            sink,
            topic: gnss_topic(base_topic),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Publish one record; serialization and transport failures are both returned
    pub async fn publish(&mut self, record: &FullPositionRecord) -> PublishResult<()> {
        let payload = encode_payload(record)?;
        debug!(topic = %self.topic, bytes = payload.len(), "publishing GNSS payload");
        self.sink.publish(&self.topic, payload).await
    }

    /// Close the underlying transport
    pub async fn shutdown(self, grace: Duration) {
        self.sink.shutdown(grace).await;
    }
}
