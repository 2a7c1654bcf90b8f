use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounts {
    pub online: u32,
    pub max: u32,
}

/// Point-in-time view of a server as reported by one status provider.
///
/// When `online` is false the remaining fields carry no guarantee: a
/// provider may still report a version or player counts from a partial
/// answer, or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatusSnapshot {
    pub online: bool,
    pub host: String,
    pub port: Option<u16>,
    pub version: Option<String>,
    pub players: Option<PlayerCounts>,
    /// Milliseconds, exactly as the provider reported it.
    pub latency: Option<f64>,
    pub motd: Option<Vec<String>>,
}

impl ServerStatusSnapshot {
    /// Result of a resolution where no provider produced an answer.
    pub fn unreachable(host: &str) -> Self {
        Self {
            online: false,
            host: host.to_string(),
            port: None,
            version: None,
            players: None,
            latency: None,
            motd: None,
        }
    }
}

/// Extracts the port from `hostname:port` or `[v6]:port`. Bare IPv6
/// literals have no port.
pub fn port_from_host(host: &str) -> Option<u16> {
    let (address, port) = host.rsplit_once(':')?;
    if address.contains(':') && !(address.starts_with('[') && address.ends_with(']')) {
        return None;
    }
    port.parse().ok()
}
