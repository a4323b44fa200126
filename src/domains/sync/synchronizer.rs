use crate::common::{DomainError, SyncMetrics};
use crate::domains::logger::DynLogger;
use crate::domains::scene::{EntityRegistry, LightColor, Position3D};
use crate::domains::sync::ports::{PositionFeed, StateFeed};
use crate::domains::sync::samples::{PositionRecord, StateSample};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Periodic position mirror for one entity class.
///
/// Each cycle fetches the class's full position list and overwrites the
/// position of every registered object named in it, at the class height.
/// Failures never stop the loop: a failed cycle is logged, counted and
/// skipped whole, and the next attempt happens one period later.
pub struct PositionSynchronizer {
    registry: EntityRegistry,
    feed: Arc<dyn PositionFeed>,
    endpoint: String,
    height: f64,
    period: Duration,
    logger: DynLogger,
    metrics: Arc<SyncMetrics>,
}

impl PositionSynchronizer {
    pub fn new(
        registry: EntityRegistry,
        feed: Arc<dyn PositionFeed>,
        endpoint: String,
        height: f64,
        period: Duration,
        logger: DynLogger,
    ) -> Self {
        Self {
            registry,
            feed,
            endpoint,
            height,
            period,
            logger,
            metrics: Arc::new(SyncMetrics::new()),
        }
    }

    pub fn metrics(&self) -> Arc<SyncMetrics> {
        self.metrics.clone()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Poll until cancelled. Cancellation is honored at both suspension
    /// points: the inter-cycle delay and the fetch await.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.run_cycle() => {}
            }
        }
        self.logger
            .info(&format!("{} position sync stopped", self.registry.class()));
    }

    /// One fetch-decode-apply pass.
    pub async fn run_cycle(&self) {
        self.metrics.record_cycle();

        let records = match self.feed.fetch_positions(&self.endpoint).await {
            Ok(records) => records,
            Err(err) => {
                self.note_failure(&err);
                return;
            }
        };

        let (applied, ignored) = apply_positions(&self.registry, records, self.height);
        self.metrics.record_applied(applied);
        self.metrics.record_ignored(ignored);
    }

    fn note_failure(&self, err: &DomainError) {
        match err {
            DomainError::Transport { .. } => self.metrics.record_transport_error(),
            DomainError::Decode { .. } => self.metrics.record_decode_error(),
            _ => {}
        }
        self.logger
            .error(&format!("{} position sync: {}", self.registry.class(), err));
    }
}

/// Validate each record and overwrite the matching registered object's
/// position at the class height. Returns (applied, ignored) counts; records
/// with bad arity or unregistered ids fall into the ignored bucket.
fn apply_positions(registry: &EntityRegistry, records: Vec<PositionRecord>, height: f64) -> (u64, u64) {
    let mut applied = 0u64;
    let mut ignored = 0u64;
    for record in records {
        let sample = match record.validate() {
            Some(sample) => sample,
            None => {
                ignored += 1;
                continue;
            }
        };
        if let Some(object) = registry.get(&sample.id) {
            object.set_position(Position3D {
                x: sample.x,
                y: height,
                z: sample.z,
            });
            applied += 1;
        } else {
            ignored += 1;
        }
    }
    (applied, ignored)
}

/// One-shot initial placement: a single fetch-decode-apply pass with the same
/// contract as a periodic position cycle. Used to seed the absolute position
/// of fixed-but-externally-positioned entities before their state begins
/// updating; on failure they keep their design-time position.
pub async fn seed_positions(
    registry: &EntityRegistry,
    feed: &dyn PositionFeed,
    endpoint: &str,
    height: f64,
    logger: &DynLogger,
) {
    match feed.fetch_positions(endpoint).await {
        Ok(records) => {
            let (applied, _) = apply_positions(registry, records, height);
            logger.info(&format!(
                "{}: seeded {} fixture positions",
                registry.class(),
                applied
            ));
        }
        Err(err) => {
            logger.warn(&format!(
                "{}: initial placement skipped: {}",
                registry.class(),
                err
            ));
        }
    }
}

/// Periodic state mirror for traffic-light fixtures.
///
/// Each cycle re-asserts the full indicator state of every fixture named in
/// the feed: the sub-indicator matching the reported color is lit and the
/// other two are unlit. Ticks are idempotent, so a missed cycle heals on the
/// next successful one.
pub struct StateSynchronizer {
    registry: EntityRegistry,
    feed: Arc<dyn StateFeed>,
    endpoint: String,
    period: Duration,
    logger: DynLogger,
    metrics: Arc<SyncMetrics>,
}

impl StateSynchronizer {
    pub fn new(
        registry: EntityRegistry,
        feed: Arc<dyn StateFeed>,
        endpoint: String,
        period: Duration,
        logger: DynLogger,
    ) -> Self {
        Self {
            registry,
            feed,
            endpoint,
            period,
            logger,
            metrics: Arc::new(SyncMetrics::new()),
        }
    }

    pub fn metrics(&self) -> Arc<SyncMetrics> {
        self.metrics.clone()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.run_cycle() => {}
            }
        }
        self.logger
            .info(&format!("{} state sync stopped", self.registry.class()));
    }

    pub async fn run_cycle(&self) {
        self.metrics.record_cycle();

        let records = match self.feed.fetch_states(&self.endpoint).await {
            Ok(records) => records,
            Err(err) => {
                match err {
                    DomainError::Transport { .. } => self.metrics.record_transport_error(),
                    DomainError::Decode { .. } => self.metrics.record_decode_error(),
                    _ => {}
                }
                self.logger
                    .error(&format!("{} state sync: {}", self.registry.class(), err));
                return;
            }
        };

        let mut applied = 0u64;
        let mut ignored = 0u64;
        for record in records {
            let sample = StateSample::from(record);
            if let Some(object) = self.registry.get(&sample.id) {
                for color in LightColor::ALL {
                    // A missing sub-indicator is tolerated, as the host
                    // scene may model fixtures partially.
                    let _ = object.set_indicator(color.indicator_name(), color == sample.state);
                }
                applied += 1;
            } else {
                ignored += 1;
            }
        }
        self.metrics.record_applied(applied);
        self.metrics.record_ignored(ignored);
    }
}
