use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use super::{MotdLines, RawPlayers, StatusProvider, endpoint, get_json, parse_base_url};
use crate::error::StatusError;
use crate::snapshot::{ServerStatusSnapshot, port_from_host};

// Bare arrays must be tried first: serde will happily read a JSON array
// into the struct variant positionally.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum McSrvStatMotd {
    Lines(Vec<String>),
    Structured { clean: Option<MotdLines> },
}

impl McSrvStatMotd {
    fn into_lines(self) -> Option<Vec<String>> {
        match self {
            McSrvStatMotd::Lines(lines) => Some(lines),
            McSrvStatMotd::Structured { clean } => clean.map(MotdLines::into_lines),
        }
    }
}

#[derive(Debug, Deserialize)]
struct McSrvStatDebug {
    ping: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct McSrvStatResponse {
    online: bool,
    hostname: Option<String>,
    port: Option<u16>,
    version: Option<String>,
    players: Option<RawPlayers>,
    ping: Option<Value>,
    debug: Option<McSrvStatDebug>,
    motd: Option<McSrvStatMotd>,
}

impl McSrvStatResponse {
    fn into_snapshot(self, queried: &str) -> ServerStatusSnapshot {
        // The live API reports `debug.ping` as a boolean ("was a ping
        // used"); only numeric values are latencies.
        let latency = self
            .debug
            .and_then(|d| d.ping)
            .and_then(|p| p.as_f64())
            .or_else(|| self.ping.and_then(|p| p.as_f64()));

        // `ip` is the resolved address, not what was asked for.
        let host = self
            .hostname
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| queried.to_string());

        ServerStatusSnapshot {
            online: self.online,
            host,
            // Offline answers carry `"port": 0`.
            port: self
                .port
                .filter(|port| *port != 0)
                .or_else(|| port_from_host(queried)),
            version: self.version,
            players: self.players.as_ref().and_then(RawPlayers::counts),
            latency,
            motd: self.motd.and_then(McSrvStatMotd::into_lines),
        }
    }
}

/// Version 2 of the mcsrvstat.us API.
#[derive(Debug, Clone)]
pub struct McSrvStatProvider {
    client: Client,
    base_url: Url,
}

impl McSrvStatProvider {
    pub fn new(client: Client, base_url: &str) -> Result<Self, StatusError> {
        Ok(McSrvStatProvider {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl StatusProvider for McSrvStatProvider {
    fn name(&self) -> &str {
        "mcsrvstat.us"
    }

    async fn fetch(&self, host: &str) -> Result<ServerStatusSnapshot, StatusError> {
        let url = endpoint(&self.base_url, &["2"], host)?;
        let response: McSrvStatResponse = get_json(&self.client, url).await?;
        Ok(response.into_snapshot(host))
    }
}
