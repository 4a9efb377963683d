//! MQTT transport over TLS

use crate::publish::{PublishError, PublishResult, PublishSink};
use crate::utils::config::BrokerConfig;
use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Capacity of the client request queue; one slot so readings never pile up
const REQUEST_QUEUE_CAPACITY: usize = 1;

/// Pause between reconnect attempts once the session is running
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Publish sink backed by an MQTT session
///
/// The event loop runs in its own task and reconnects on its own after the
/// initial connection has been acknowledged. Publishes are refused while the
/// session is down.
pub struct MqttSink {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
    event_loop: JoinHandle<()>,
}

impl MqttSink {
    /// Connect to the broker and wait for its CONNACK
    pub async fn connect(config: &BrokerConfig) -> PublishResult<Self> {
        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        options
            .set_credentials(&config.username, &config.password)
            .set_keep_alive(config.keep_alive)
            .set_transport(Transport::tls_with_default_config());

        let (client, mut event_loop) = AsyncClient::new(options, REQUEST_QUEUE_CAPACITY);
        wait_for_connack(&mut event_loop).await?;
        info!(host = %config.host, port = config.port, "connected to MQTT broker");

        Ok(Self::spawn(client, event_loop, true))
    }

    fn spawn(client: AsyncClient, event_loop: EventLoop, connected: bool) -> Self {
        let connected = Arc::new(AtomicBool::new(connected));
        Self {
            client,
            event_loop: tokio::spawn(drive(event_loop, connected.clone())),
            connected,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Request a disconnect and wait up to `grace` for the session to end
    ///
    /// Returns `false` when the event loop had to be aborted.
    async fn close(self, grace: Duration) -> bool {
        let MqttSink { client, mut event_loop, .. } = self;

        if let Err(error) = client.try_disconnect() {
            debug!(%error, "MQTT disconnect request not queued");
        }

        match tokio::time::timeout(grace, &mut event_loop).await {
            Ok(_) => {
                debug!("MQTT session closed");
                true
            }
            Err(_) => {
                event_loop.abort();
                debug!(grace_ms = grace.as_millis() as u64, "grace period elapsed, MQTT session dropped");
                false
            }
        }
    }
}

impl PublishSink for MqttSink {
    async fn publish(&mut self, topic: &str, payload: Vec<u8>) -> PublishResult<()> {
        if !self.is_connected() {
            return Err(PublishError::Transport {
                topic: topic.to_string(),
                details: "broker not connected".to_string(),
            });
        }

        // try_publish keeps a tick from stalling on a full request queue
        self.client
            .try_publish(topic, QoS::AtMostOnce, false, payload)
            .map_err(|error| PublishError::Transport {
                topic: topic.to_string(),
                details: error.to_string(),
            })
    }

    async fn shutdown(self, grace: Duration) {
        self.close(grace).await;
    }
}

async fn wait_for_connack(event_loop: &mut EventLoop) -> PublishResult<()> {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => return Ok(()),
            Ok(_) => continue,
            Err(error) => {
                return Err(PublishError::Connection {
                    details: error.to_string(),
                })
            }
        }
    }
}

async fn drive(mut event_loop: EventLoop, connected: Arc<AtomicBool>) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => break,
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                connected.store(true, Ordering::SeqCst);
                info!("reconnected to MQTT broker");
            }
            Ok(_) => {}
            Err(ConnectionError::RequestsDone) => break,
            Err(error) => {
                if connected.swap(false, Ordering::SeqCst) {
                    warn!(%error, "MQTT connection lost");
                } else {
                    debug!(%error, "MQTT reconnect failed");
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
    connected.store(false, Ordering::SeqCst);
}
