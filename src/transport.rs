//! HTTP transport capability
//!
//! The pagers never talk to the network directly; they go through the
//! [`HttpTransport`] trait so the production client and the canned-response
//! mock are interchangeable at construction time.

use crate::error::{ExplorerError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Abstraction over the ability to GET a URL and return the response body.
/// Implementations must be shareable across concurrent enrichment fetches.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue one GET request and return the raw body bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Production transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a per-request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExplorerError::Transport(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| ExplorerError::Transport(e.to_string()))?;

        Ok(body.to_vec())
    }
}
