use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use traffic_mirror::adapters::inbound::MemoryScene;
use traffic_mirror::adapters::outbound::init_noop_logger;
use traffic_mirror::common::DomainResult;
use traffic_mirror::domains::scene::{
    EntityRegistry, LightColor, Position3D, SceneObject,
};
use traffic_mirror::domains::sync::{
    PositionFeed, PositionRecord, PositionSynchronizer, StateFeed, StateRecord,
    StateSynchronizer,
};

struct ScriptedPositions {
    responses: Mutex<VecDeque<DomainResult<Vec<PositionRecord>>>>,
}

impl ScriptedPositions {
    fn new(responses: Vec<DomainResult<Vec<PositionRecord>>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl PositionFeed for ScriptedPositions {
    async fn fetch_positions(&self, _endpoint: &str) -> DomainResult<Vec<PositionRecord>> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

struct ScriptedStates {
    responses: Mutex<VecDeque<DomainResult<Vec<StateRecord>>>>,
}

impl ScriptedStates {
    fn new(responses: Vec<DomainResult<Vec<StateRecord>>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl StateFeed for ScriptedStates {
    async fn fetch_states(&self, _endpoint: &str) -> DomainResult<Vec<StateRecord>> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn car_scene(indices: &[u32]) -> Arc<MemoryScene> {
    let scene = Arc::new(MemoryScene::new());
    for index in indices {
        scene.add_object(
            &format!("car_{}", index),
            Position3D { x: 0.0, y: 0.0, z: 0.0 },
        );
    }
    scene
}

fn position(id: &str, coords: Vec<f64>) -> PositionRecord {
    PositionRecord {
        id: id.to_string(),
        position: coords,
    }
}

#[tokio::test]
async fn discovery_skips_absent_objects() {
    let scene = car_scene(&[233, 235]);
    let registry = EntityRegistry::discover("car", "car_", 233..=242, scene.as_ref());

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("car_233"));
    assert!(registry.contains("car_235"));
    assert!(!registry.contains("car_234"));
}

#[tokio::test]
async fn discovery_of_empty_range_is_not_an_error() {
    let scene = Arc::new(MemoryScene::new());
    let registry = EntityRegistry::discover("car", "car_", 1..=10, scene.as_ref());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn position_apply_is_idempotent() {
    let scene = car_scene(&[235]);
    let registry = EntityRegistry::discover("car", "car_", 233..=242, scene.as_ref());
    let feed = ScriptedPositions::new(vec![
        Ok(vec![position("car_235", vec![10.5, -3.2])]),
        Ok(vec![position("car_235", vec![10.5, -3.2])]),
    ]);
    let synchronizer = PositionSynchronizer::new(
        registry,
        feed,
        "/get_car_positions".to_string(),
        0.0,
        Duration::from_secs(1),
        init_noop_logger(),
    );

    synchronizer.run_cycle().await;
    let after_first = scene.object("car_235").unwrap().position();
    synchronizer.run_cycle().await;
    let after_second = scene.object("car_235").unwrap().position();

    assert_eq!(after_first, Position3D { x: 10.5, y: 0.0, z: -3.2 });
    assert_eq!(after_first, after_second);
    assert_eq!(synchronizer.metrics().snapshot().samples_applied, 2);
}

#[tokio::test]
async fn unregistered_id_is_a_no_op() {
    let scene = car_scene(&[233]);
    let registry = EntityRegistry::discover("car", "car_", 233..=242, scene.as_ref());
    let feed = ScriptedPositions::new(vec![Ok(vec![position("car_999", vec![5.0, 5.0])])]);
    let synchronizer = PositionSynchronizer::new(
        registry,
        feed,
        "/get_car_positions".to_string(),
        0.0,
        Duration::from_secs(1),
        init_noop_logger(),
    );

    synchronizer.run_cycle().await;

    let untouched = scene.object("car_233").unwrap().position();
    assert_eq!(untouched, Position3D { x: 0.0, y: 0.0, z: 0.0 });
    let snapshot = synchronizer.metrics().snapshot();
    assert_eq!(snapshot.samples_applied, 0);
    assert_eq!(snapshot.samples_ignored, 1);
}

#[tokio::test]
async fn wrong_arity_record_has_no_effect() {
    let scene = car_scene(&[233]);
    let registry = EntityRegistry::discover("car", "car_", 233..=242, scene.as_ref());
    let feed = ScriptedPositions::new(vec![Ok(vec![
        position("car_233", vec![1.0, 2.0, 3.0]),
        position("car_233", vec![4.0]),
    ])]);
    let synchronizer = PositionSynchronizer::new(
        registry,
        feed,
        "/get_car_positions".to_string(),
        0.0,
        Duration::from_secs(1),
        init_noop_logger(),
    );

    synchronizer.run_cycle().await;

    let untouched = scene.object("car_233").unwrap().position();
    assert_eq!(untouched, Position3D { x: 0.0, y: 0.0, z: 0.0 });
    assert_eq!(synchronizer.metrics().snapshot().samples_ignored, 2);
}

#[tokio::test]
async fn vehicle_height_is_fixed_per_class() {
    let scene = Arc::new(MemoryScene::new());
    scene.add_object("ev_242", Position3D { x: 0.0, y: 0.0, z: 0.0 });
    let registry = EntityRegistry::discover("ev", "ev_", 242..=244, scene.as_ref());
    let feed = ScriptedPositions::new(vec![Ok(vec![position("ev_242", vec![7.0, 8.0])])]);
    let synchronizer = PositionSynchronizer::new(
        registry,
        feed,
        "/get_ev_positions".to_string(),
        0.0,
        Duration::from_secs(1),
        init_noop_logger(),
    );

    synchronizer.run_cycle().await;

    assert_eq!(
        scene.object("ev_242").unwrap().position(),
        Position3D { x: 7.0, y: 0.0, z: 8.0 }
    );
}

#[tokio::test]
async fn state_apply_lights_exactly_one_indicator() {
    let scene = Arc::new(MemoryScene::new());
    scene.add_fixture("traffic_light_9", Position3D { x: 0.0, y: 2.0, z: 0.0 });
    let registry = EntityRegistry::discover("traffic_light", "traffic_light_", 7..=25, scene.as_ref());
    let feed = ScriptedStates::new(vec![
        Ok(vec![StateRecord {
            id: "traffic_light_9".to_string(),
            state: LightColor::Green,
        }]),
        Ok(vec![StateRecord {
            id: "traffic_light_9".to_string(),
            state: LightColor::Red,
        }]),
    ]);
    let synchronizer = StateSynchronizer::new(
        registry,
        feed,
        "/get_traffic_light_states".to_string(),
        Duration::from_secs(1),
        init_noop_logger(),
    );

    synchronizer.run_cycle().await;
    assert_eq!(
        scene.object("traffic_light_9").unwrap().lit_indicators(),
        vec!["green".to_string()]
    );

    // A later different state flips with no residue
    synchronizer.run_cycle().await;
    assert_eq!(
        scene.object("traffic_light_9").unwrap().lit_indicators(),
        vec!["red".to_string()]
    );
}

#[tokio::test]
async fn missing_sub_indicator_is_tolerated() {
    let scene = Arc::new(MemoryScene::new());
    // Authored as a plain object: no red/yellow/green children
    scene.add_object("traffic_light_9", Position3D { x: 0.0, y: 2.0, z: 0.0 });
    let handle = scene.object("traffic_light_9").unwrap();
    assert!(!handle.set_indicator("red", true));

    let registry = EntityRegistry::discover("traffic_light", "traffic_light_", 7..=25, scene.as_ref());
    let feed = ScriptedStates::new(vec![Ok(vec![StateRecord {
        id: "traffic_light_9".to_string(),
        state: LightColor::Red,
    }])]);
    let synchronizer = StateSynchronizer::new(
        registry,
        feed,
        "/get_traffic_light_states".to_string(),
        Duration::from_secs(1),
        init_noop_logger(),
    );

    // Must not panic or error; the fixture just stays dark
    synchronizer.run_cycle().await;
    assert!(scene.object("traffic_light_9").unwrap().lit_indicators().is_empty());
}
