use crate::common::SyncMetrics;
use crate::config::Config;
use crate::domains::logger::DynLogger;
use crate::domains::scene::{EntityRegistry, SceneGraph};
use crate::domains::sync::{
    seed_positions, PositionFeed, PositionSynchronizer, StateFeed, StateSynchronizer,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Wires discovery and the synchronizer tasks together.
///
/// One registry is built per entity class and handed to exactly one
/// synchronizer; the service keeps only the cancellation root, the task
/// handles and the per-class metrics.
pub struct SyncService {
    config: Config,
    scene: Arc<dyn SceneGraph>,
    position_feed: Arc<dyn PositionFeed>,
    state_feed: Arc<dyn StateFeed>,
    logger: DynLogger,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    metrics: HashMap<String, Arc<SyncMetrics>>,
}

impl SyncService {
    pub fn new(
        config: Config,
        scene: Arc<dyn SceneGraph>,
        position_feed: Arc<dyn PositionFeed>,
        state_feed: Arc<dyn StateFeed>,
        logger: DynLogger,
    ) -> Self {
        Self {
            config,
            scene,
            position_feed,
            state_feed,
            logger,
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
            metrics: HashMap::new(),
        }
    }

    /// Discover each entity class against the scene graph and start its
    /// synchronizer task. An empty registry is not an error; its class simply
    /// has nothing to update.
    pub fn start(&mut self) {
        let period = self.config.cycle_period();

        for class in &self.config.scene.vehicle_classes {
            let registry = EntityRegistry::discover(
                &class.name,
                &class.id_prefix,
                class.first_index..=class.last_index,
                self.scene.as_ref(),
            );
            self.logger.info(&format!(
                "{}: registered {} scene objects",
                class.name,
                registry.len()
            ));
            let synchronizer = PositionSynchronizer::new(
                registry,
                self.position_feed.clone(),
                class.endpoint.clone(),
                class.height,
                period,
                self.logger.clone(),
            );
            self.metrics
                .insert(class.name.clone(), synchronizer.metrics());
            let token = self.cancel.child_token();
            self.tasks.push(tokio::spawn(synchronizer.run(token)));
        }

        let lights = self.config.scene.traffic_lights.clone();
        let registry = EntityRegistry::discover(
            "traffic_light",
            &lights.id_prefix,
            lights.first_index..=lights.last_index,
            self.scene.as_ref(),
        );
        self.logger.info(&format!(
            "traffic_light: registered {} scene objects",
            registry.len()
        ));
        let synchronizer = StateSynchronizer::new(
            registry,
            self.state_feed.clone(),
            lights.states_endpoint.clone(),
            period,
            self.logger.clone(),
        );
        self.metrics
            .insert("traffic_light".to_string(), synchronizer.metrics());

        // Fixtures are placed once from the remote feed before state polling
        // begins; both steps run inside the class's own task so startup is
        // never blocked on the network.
        let position_feed = self.position_feed.clone();
        let logger = self.logger.clone();
        let token = self.cancel.child_token();
        self.tasks.push(tokio::spawn(async move {
            seed_positions(
                synchronizer.registry(),
                position_feed.as_ref(),
                &lights.positions_endpoint,
                lights.height,
                &logger,
            )
            .await;
            synchronizer.run(token).await;
        }));
    }

    /// Metrics for one entity class (`car`, `ev`, ..., `traffic_light`).
    pub fn metrics(&self, class: &str) -> Option<Arc<SyncMetrics>> {
        self.metrics.get(class).cloned()
    }

    /// Cancel every synchronizer and wait for the tasks to drain.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for task in self.tasks {
            let _ = task.await;
        }
    }
}
