use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single provider attempt. The resolver absorbs these; they
/// only surface to code calling a [`StatusProvider`](crate::StatusProvider)
/// directly.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider answered with HTTP {0}")]
    UnexpectedStatus(StatusCode),

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error("invalid provider base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("{0}")]
    Other(String),
}

impl StatusError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
