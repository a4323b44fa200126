use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Port trait for a controllable visual object in the host scene.
/// The host engine binding supplies the real implementation; the in-memory
/// adapter stands in for it headless and in tests.
pub trait SceneObject: Send + Sync {
    /// Overwrite the object's position in scene space.
    fn set_position(&self, position: Position3D);

    /// Toggle the emissive sub-indicator with the given name. A missing
    /// sub-indicator is reported, not fatal.
    fn set_indicator(&self, name: &str, lit: bool) -> bool;
}

pub type SceneHandle = Arc<dyn SceneObject>;

/// Port for resolving scene objects by their externally assigned name.
pub trait SceneGraph: Send + Sync {
    fn resolve(&self, id: &str) -> Option<SceneHandle>;
}
