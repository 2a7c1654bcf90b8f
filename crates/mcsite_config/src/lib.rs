pub mod error;
pub mod loader;
pub mod models;

pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_PATH, load_config, try_load_config};
pub use models::logging::{LogType, LoggingConfig};
pub use models::site::SiteConfig;
pub use models::status::StatusConfig;
pub use models::webhook::WebhooksConfig;
