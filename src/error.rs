//! Error types for the explorer client

use std::fmt;

#[derive(Debug, Clone)]
pub enum ExplorerError {
    InvalidRequest(String),
    Transport(String),
    NoData,
    Decode(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExplorerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ExplorerError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ExplorerError::NoData => write!(f, "Server returned no data"),
            ExplorerError::Decode(msg) => write!(f, "Decode error: {}", msg),
        }
    }
}

impl std::error::Error for ExplorerError {}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        ExplorerError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::Decode(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ExplorerError>;
