pub mod memory_scene;

pub use memory_scene::*;
