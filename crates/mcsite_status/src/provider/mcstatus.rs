use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{MotdLines, RawPlayers, StatusProvider, endpoint, get_json, parse_base_url};
use crate::error::StatusError;
use crate::snapshot::{ServerStatusSnapshot, port_from_host};

#[derive(Debug, Deserialize)]
struct McStatusVersion {
    name: Option<String>,
    name_clean: Option<String>,
}

#[derive(Debug, Deserialize)]
struct McStatusMotd {
    clean: Option<MotdLines>,
}

#[derive(Debug, Deserialize)]
struct McStatusResponse {
    online: bool,
    host: Option<String>,
    port: Option<u16>,
    version: Option<McStatusVersion>,
    players: Option<RawPlayers>,
    latency: Option<f64>,
    motd: Option<McStatusMotd>,
}

impl McStatusResponse {
    fn into_snapshot(self, queried: &str) -> ServerStatusSnapshot {
        let host = self.host.unwrap_or_else(|| queried.to_string());
        let port = self.port.or_else(|| port_from_host(queried));

        ServerStatusSnapshot {
            online: self.online,
            host,
            port,
            version: self.version.and_then(|v| v.name.or(v.name_clean)),
            players: self.players.as_ref().and_then(RawPlayers::counts),
            latency: self.latency,
            motd: self
                .motd
                .and_then(|m| m.clean)
                .map(MotdLines::into_lines),
        }
    }
}

/// Java edition endpoint of the mcstatus.io v2 API.
#[derive(Debug, Clone)]
pub struct McStatusProvider {
    client: Client,
    base_url: Url,
}

impl McStatusProvider {
    pub fn new(client: Client, base_url: &str) -> Result<Self, StatusError> {
        Ok(McStatusProvider {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl StatusProvider for McStatusProvider {
    fn name(&self) -> &str {
        "mcstatus.io"
    }

    async fn fetch(&self, host: &str) -> Result<ServerStatusSnapshot, StatusError> {
        let url = endpoint(&self.base_url, &["v2", "status", "java"], host)?;
        let response: McStatusResponse = get_json(&self.client, url).await?;
        Ok(response.into_snapshot(host))
    }
}
