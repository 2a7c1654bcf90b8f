pub mod mcsrvstat;
pub mod mcstatus;
pub mod mock;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::StatusError;
use crate::snapshot::ServerStatusSnapshot;
use mcsite_config::LogType;

/// A public status API that can describe a Minecraft server.
///
/// Implementations must map the provider's own JSON shape into a
/// [`ServerStatusSnapshot`] and report anything short of a decodable 2xx
/// answer as an error, so the resolver can move on to the next provider.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn fetch(&self, host: &str) -> Result<ServerStatusSnapshot, StatusError>;
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, StatusError> {
    let url = Url::parse(base_url).map_err(|_| StatusError::InvalidBaseUrl(base_url.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(StatusError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(url)
}

/// Appends `segments` and then `host` as one percent-encoded path segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str], host: &str) -> Result<Url, StatusError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| StatusError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments)
        .push(host);
    Ok(url)
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<T, StatusError> {
    debug!(log_type = LogType::Status.as_str(), "GET {}", url);

    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(StatusError::UnexpectedStatus(response.status()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// MOTD lines as either an array or a single newline-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MotdLines {
    Lines(Vec<String>),
    Text(String),
}

impl MotdLines {
    pub(crate) fn into_lines(self) -> Vec<String> {
        match self {
            MotdLines::Lines(lines) => lines,
            MotdLines::Text(text) => text.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlayers {
    pub online: Option<u32>,
    pub max: Option<u32>,
}

impl RawPlayers {
    pub(crate) fn counts(&self) -> Option<crate::PlayerCounts> {
        Some(crate::PlayerCounts {
            online: self.online?,
            max: self.max?,
        })
    }
}

pub use mcsrvstat::McSrvStatProvider;
pub use mcstatus::McStatusProvider;
pub use mock::{MockBehavior, MockStatusProvider};
