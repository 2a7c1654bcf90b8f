use std::{fs, io, path::Path};

use tracing::{debug, info};

use crate::{ConfigError, LogType, SiteConfig};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Reads and validates a configuration file. A missing file is not an
/// error: the site runs on defaults plus environment overrides.
pub fn try_load_config(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(
                log_type = LogType::Config.as_str(),
                "No configuration at {}, using defaults",
                path.display()
            );
            return Ok(SiteConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = load_config(&content)?;
    debug!(
        log_type = LogType::Config.as_str(),
        "Loaded configuration from {}",
        path.display()
    );
    Ok(config)
}

pub fn load_config(content: &str) -> Result<SiteConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(SiteConfig::default());
    }

    let config: SiteConfig = serde_yaml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
