//! Fixed-interval acquisition loop
//!
//! One tick is `Idle → Acquiring → Decoding → Publishing → Idle`. Failures
//! are logged and the tick is dropped; nothing is queued or retried.
//! Cancellation is observed between ticks only, so an acquisition or publish
//! already in flight always completes. Acquisition is bounded by
//! [`ACQUIRE_TIMEOUT`], which keeps a silent service from blocking shutdown.

use crate::core::{FullPositionRecord, ACQUIRE_TIMEOUT, SHUTDOWN_GRACE_PERIOD};
use crate::processing::decode;
use crate::publish::{PublishSink, Publisher};
use crate::source::{AcquireError, PositionSource};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, trace, warn};

/// Loop state, advanced once per phase of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Acquiring,
    Decoding,
    Publishing,
    ShuttingDown,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Published,
    AcquireFailed,
    PublishFailed,
}

/// Counters reported when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub published: u64,
    pub acquire_failures: u64,
    pub publish_failures: u64,
}

/// Drives acquisition, decoding and publishing on a fixed cadence
pub struct AcquisitionLoop<S: PositionSource, P: PublishSink> {
    source: S,
    publisher: Publisher<P>,
    interval: Duration,
    state: LoopState,
    stats: LoopStats,
    last_published: Option<FullPositionRecord>,
}

impl<S: PositionSource, P: PublishSink> AcquisitionLoop<S, P> {
    pub fn new(source: S, publisher: Publisher<P>, interval: Duration) -> Self {
        Self {
            source,
            publisher,
            interval,
            state: LoopState::Idle,
            stats: LoopStats::default(),
            last_published: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Most recent record that reached the broker
    pub fn last_published(&self) -> Option<&FullPositionRecord> {
        self.last_published.as_ref()
    }

    fn transition(&mut self, next: LoopState) {
        trace!(from = ?self.state, to = ?next, "loop state");
        self.state = next;
    }

    /// Run one acquisition and publish cycle
    pub async fn tick(&mut self) -> TickOutcome {
        self.stats.ticks += 1;

        self.transition(LoopState::Acquiring);
        let acquired = tokio::time::timeout(ACQUIRE_TIMEOUT, self.source.acquire())
            .await
            .unwrap_or_else(|_| Err(AcquireError::TimedOut { timeout: ACQUIRE_TIMEOUT }));
        let raw = match acquired {
            Ok(raw) => raw,
            Err(error) => {
                warn!(source = self.source.name(), %error, "failed to get GNSS data");
                self.stats.acquire_failures += 1;
                self.transition(LoopState::Idle);
                return TickOutcome::AcquireFailed;
            }
        };

        self.transition(LoopState::Decoding);
        let record = decode(&raw);

        self.transition(LoopState::Publishing);
        let outcome = match self.publisher.publish(&record).await {
            Ok(()) => {
                info!(
                    topic = self.publisher.topic(),
                    valid = record.valid,
                    satellites = record.tracked_satellites(),
                    at = %chrono::Utc::now().to_rfc3339(),
                    "published GNSS data to MQTT"
                );
                self.stats.published += 1;
                self.last_published = Some(record);
                TickOutcome::Published
            }
            Err(error) => {
                warn!(%error, "failed to publish GNSS data");
                self.stats.publish_failures += 1;
                TickOutcome::PublishFailed
            }
        };

        self.transition(LoopState::Idle);
        outcome
    }

    /// Tick every `interval` until `cancel` fires, then close the publisher
    ///
    /// The first tick happens one interval after the call.
    pub async fn run(mut self, cancel: CancellationToken) -> LoopStats {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.interval.as_secs(), source = self.source.name(), "acquisition loop started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        self.transition(LoopState::ShuttingDown);
        let stats = self.stats;
        info!(
            ticks = stats.ticks,
            published = stats.published,
            acquire_failures = stats.acquire_failures,
            publish_failures = stats.publish_failures,
            "shutting down gracefully"
        );
        self.publisher.shutdown(SHUTDOWN_GRACE_PERIOD).await;
        stats
    }
}
