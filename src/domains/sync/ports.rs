use super::samples::{PositionRecord, StateRecord};
use crate::common::DomainResult;
use async_trait::async_trait;

/// Port for fetching the full current position list of one entity class.
/// Adapters map transport and payload problems into the domain error
/// taxonomy; the synchronizers never see the transport.
#[async_trait]
pub trait PositionFeed: Send + Sync {
    async fn fetch_positions(&self, endpoint: &str) -> DomainResult<Vec<PositionRecord>>;
}

/// Port for fetching the full current traffic-light state list.
#[async_trait]
pub trait StateFeed: Send + Sync {
    async fn fetch_states(&self, endpoint: &str) -> DomainResult<Vec<StateRecord>>;
}
