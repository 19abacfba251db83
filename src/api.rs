//! Paginated feed fetcher for the TzKT REST API
//!
//! A thin GET-and-decode helper: builds the endpoint URL, runs it through
//! the injected transport, and decodes the JSON body. It holds no
//! pagination state and mutates nothing outside the call; cursors and
//! visible collections belong to the pagers.

use crate::config::ApiConfig;
use crate::error::{ExplorerError, Result};
use crate::model::{Block, Transaction};
use crate::transport::HttpTransport;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// GET-only client over one explorer deployment.
#[derive(Clone)]
pub struct ApiService {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
}

impl ApiService {
    /// Build a service from an immutable configuration value and a
    /// transport capability.
    pub fn new(config: ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = ApiConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self { config, transport }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL of one page of the block feed, newest first.
    pub fn blocks_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}/v1/blocks?sort.desc=level&offset={}&limit={}",
            self.config.base_url, offset, limit
        )
    }

    /// URL of the transaction count for one block level.
    pub fn transaction_count_url(&self, level: i64) -> String {
        format!(
            "{}/v1/operations/transactions/count?level={}",
            self.config.base_url, level
        )
    }

    /// URL of one page of a block's transaction feed.
    pub fn transactions_url(&self, level: i64, offset: usize, limit: usize) -> String {
        format!(
            "{}/v1/operations/transactions?level={}&offset={}&limit={}",
            self.config.base_url, level, offset, limit
        )
    }

    /// Fetch one page of blocks.
    pub async fn fetch_blocks(&self, offset: usize, limit: usize) -> Result<Vec<Block>> {
        self.fetch_json(&self.blocks_url(offset, limit)).await
    }

    /// Fetch the transaction count for a block level.
    pub async fn fetch_transaction_count(&self, level: i64) -> Result<i64> {
        self.fetch_json(&self.transaction_count_url(level)).await
    }

    /// Fetch one page of transactions for a block level.
    pub async fn fetch_transactions(
        &self,
        level: i64,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        self.fetch_json(&self.transactions_url(level, offset, limit))
            .await
    }

    /// GET a URL and decode its JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        reqwest::Url::parse(url)
            .map_err(|e| ExplorerError::InvalidRequest(format!("{}: {}", url, e)))?;

        debug!("GET {}", url);
        let body = self.transport.fetch(url).await?;

        if body.is_empty() {
            return Err(ExplorerError::NoData);
        }

        serde_json::from_slice(&body)
            .map_err(|e| ExplorerError::Decode(format!("{}: {}", url, e)))
    }
}
