use super::ports::{SceneGraph, SceneHandle};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Mapping from entity id to scene handle for one entity class.
///
/// Built once by [`EntityRegistry::discover`] before the class's synchronizer
/// starts, and never mutated afterwards. Ids named by the feed but absent here
/// are ignored by the synchronizers.
pub struct EntityRegistry {
    class: String,
    entries: HashMap<String, SceneHandle>,
}

impl EntityRegistry {
    /// Resolve `prefix + index` for every index in the range against the
    /// scene graph. Objects that are not present are skipped; an empty
    /// registry is not an error.
    pub fn discover(
        class: &str,
        prefix: &str,
        indices: RangeInclusive<u32>,
        scene: &dyn SceneGraph,
    ) -> Self {
        let mut entries = HashMap::new();
        for index in indices {
            let id = format!("{}{}", prefix, index);
            if let Some(handle) = scene.resolve(&id) {
                entries.insert(id, handle);
            }
        }
        Self {
            class: class.to_string(),
            entries,
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn get(&self, id: &str) -> Option<&SceneHandle> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
