use crate::common::{DomainError, DomainResult};
use crate::domains::sync::{PositionFeed, PositionRecord, StateFeed, StateRecord};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP adapter behind the feed ports. Every endpoint returns a bare JSON
/// array of records; connection problems, timeouts and non-success statuses
/// become transport errors, body shape mismatches become decode errors.
pub struct HttpTrafficFeed {
    client: Client,
    base_url: String,
}

impl HttpTrafficFeed {
    /// `timeout` applies per request and should stay below the cycle period
    /// so a stalled fetch cannot overlap the next one.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch_array<T: DeserializeOwned>(&self, endpoint: &str) -> DomainResult<Vec<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| DomainError::Transport {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            })?;
        let body = response.text().await.map_err(|err| DomainError::Transport {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&body).map_err(|source| DomainError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PositionFeed for HttpTrafficFeed {
    async fn fetch_positions(&self, endpoint: &str) -> DomainResult<Vec<PositionRecord>> {
        self.fetch_array(endpoint).await
    }
}

#[async_trait]
impl StateFeed for HttpTrafficFeed {
    async fn fetch_states(&self, endpoint: &str) -> DomainResult<Vec<StateRecord>> {
        self.fetch_array(endpoint).await
    }
}
