//! Publishing of decoded records to the message broker

pub mod sink;
pub mod publisher;
pub mod mqtt;
pub mod mock;
pub mod error;

pub use sink::PublishSink;
pub use publisher::{gnss_topic, Publisher};
pub use mqtt::MqttSink;
pub use mock::MockPublishSink;
pub use error::{PublishError, PublishResult};
