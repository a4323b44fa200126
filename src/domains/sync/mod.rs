pub mod ports;
pub mod samples;
pub mod synchronizer;

pub use ports::*;
pub use samples::*;
pub use synchronizer::*;
