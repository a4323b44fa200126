use crate::domains::scene::{LightColor, Position3D, SceneGraph, SceneHandle, SceneObject};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

struct ObjectState {
    position: Position3D,
    indicators: HashMap<String, bool>,
}

/// A named object held by [`MemoryScene`]. Vehicles carry only a position;
/// fixtures additionally carry the three emissive sub-indicators.
pub struct MemoryObject {
    name: String,
    state: Mutex<ObjectState>,
}

impl MemoryObject {
    fn new(name: &str, position: Position3D, indicators: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(ObjectState {
                position,
                indicators: indicators
                    .iter()
                    .map(|name| (name.to_string(), false))
                    .collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position3D {
        self.state.lock().unwrap().position
    }

    /// Names of the currently lit sub-indicators, in fixture order.
    pub fn lit_indicators(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        LightColor::ALL
            .iter()
            .map(|color| color.indicator_name())
            .filter(|name| state.indicators.get(*name).copied().unwrap_or(false))
            .map(str::to_string)
            .collect()
    }
}

impl SceneObject for MemoryObject {
    fn set_position(&self, position: Position3D) {
        self.state.lock().unwrap().position = position;
    }

    fn set_indicator(&self, name: &str, lit: bool) -> bool {
        match self.state.lock().unwrap().indicators.get_mut(name) {
            Some(value) => {
                *value = lit;
                true
            }
            None => false,
        }
    }
}

/// In-memory scene graph: the headless stand-in for a host-engine scene.
/// Objects are authored before discovery runs, mirroring a scene laid out at
/// design time.
#[derive(Default)]
pub struct MemoryScene {
    objects: RwLock<HashMap<String, Arc<MemoryObject>>>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Author a plain object (vehicle) at a design-time position.
    pub fn add_object(&self, name: &str, position: Position3D) {
        let object = Arc::new(MemoryObject::new(name, position, &[]));
        self.objects
            .write()
            .unwrap()
            .insert(name.to_string(), object);
    }

    /// Author a traffic-light fixture with its three sub-indicators.
    pub fn add_fixture(&self, name: &str, position: Position3D) {
        let indicators: Vec<&str> = LightColor::ALL
            .iter()
            .map(|color| color.indicator_name())
            .collect();
        let object = Arc::new(MemoryObject::new(name, position, &indicators));
        self.objects
            .write()
            .unwrap()
            .insert(name.to_string(), object);
    }

    /// Direct handle access for inspection.
    pub fn object(&self, name: &str) -> Option<Arc<MemoryObject>> {
        self.objects.read().unwrap().get(name).cloned()
    }
}

impl SceneGraph for MemoryScene {
    fn resolve(&self, id: &str) -> Option<SceneHandle> {
        self.objects
            .read()
            .unwrap()
            .get(id)
            .map(|object| object.clone() as SceneHandle)
    }
}
