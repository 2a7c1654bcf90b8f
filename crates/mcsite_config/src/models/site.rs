use serde::Deserialize;

use super::{logging::LoggingConfig, status::StatusConfig, webhook::WebhooksConfig};
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub status: StatusConfig,
    pub webhooks: WebhooksConfig,
    pub logging: LoggingConfig,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status.timeout.is_zero() {
            return Err(ConfigError::invalid("status.timeout must be greater than zero"));
        }

        if self.status.refresh_interval.is_zero() {
            return Err(ConfigError::invalid(
                "status.refresh_interval must be greater than zero",
            ));
        }

        for (name, url) in [
            ("status.primary_url", &self.status.primary_url),
            ("status.fallback_url", &self.status.fallback_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::invalid(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }

        Ok(())
    }
}
