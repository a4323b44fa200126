pub mod sync_service;

pub use sync_service::*;
