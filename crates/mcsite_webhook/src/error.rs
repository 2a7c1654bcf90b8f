use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("destination answered with HTTP {0}")]
    UnexpectedStatus(StatusCode),
}
