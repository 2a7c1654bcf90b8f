use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WebhooksConfig {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Event wire name (`changelog.created`) to destination URL.
    pub destinations: HashMap<String, String>,
}

impl Default for WebhooksConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            destinations: HashMap::new(),
        }
    }
}

impl WebhooksConfig {
    /// Blank URLs count as unconfigured.
    pub fn destination(&self, event: &str) -> Option<&str> {
        self.destinations
            .get(event)
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
    }
}
