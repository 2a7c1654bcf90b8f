use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PRIMARY_URL: &str = "https://api.mcstatus.io";
pub const DEFAULT_FALLBACK_URL: &str = "https://api.mcsrvstat.us";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatusConfig {
    /// Bound on each provider attempt, not on the whole resolution.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    pub primary_url: String,
    pub fallback_url: String,
    pub user_agent: String,

    #[serde(with = "humantime_serde")]
    pub refresh_interval: Duration,

    #[serde(with = "humantime_serde")]
    pub stale_after: Duration,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(8),
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            user_agent: concat!("mcsite/", env!("CARGO_PKG_VERSION")).to_string(),
            refresh_interval: Duration::from_secs(30),
            stale_after: Duration::from_secs(15),
        }
    }
}
