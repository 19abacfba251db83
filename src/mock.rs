//! Canned-response transport for tests
//!
//! Mirrors the production transport behind the same [`HttpTransport`]
//! capability: each expected URL is stubbed with either a body or an
//! error before the pager under test runs. Lives in the library (not
//! behind `cfg(test)`) so the integration suite can use it too.

use crate::error::{ExplorerError, Result};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory transport mapping URLs to canned outcomes.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, Result<Vec<u8>>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub a successful response body for a URL.
    pub fn stub(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .expect("mock transport lock poisoned")
            .insert(url.to_string(), Ok(body.into()));
    }

    /// Stub a successful JSON response for a URL.
    pub fn stub_json<T: Serialize>(&self, url: &str, value: &T) {
        let body = serde_json::to_vec(value).expect("serializing mock response");
        self.stub(url, body);
    }

    /// Stub a failure for a URL.
    pub fn stub_error(&self, url: &str, error: ExplorerError) {
        self.responses
            .lock()
            .expect("mock transport lock poisoned")
            .insert(url.to_string(), Err(error));
    }

    /// URLs fetched so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("mock transport lock poisoned")
            .clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests
            .lock()
            .map_err(|_| ExplorerError::Transport("mock transport lock poisoned".to_string()))?
            .push(url.to_string());

        self.responses
            .lock()
            .map_err(|_| ExplorerError::Transport("mock transport lock poisoned".to_string()))?
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(ExplorerError::Transport(format!(
                    "no canned response for {}",
                    url
                )))
            })
    }
}
