pub mod logger;
pub mod scene;
pub mod sync;

pub use logger::*;
pub use scene::*;
pub use sync::*;
