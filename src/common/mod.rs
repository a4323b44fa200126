pub mod error;
pub mod metrics;

pub use error::*;
pub use metrics::*;
