use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub debug: bool,
    pub use_color: bool,
    pub show_target: bool,
    pub show_timestamp: bool,
    /// Extra `EnvFilter` directive, e.g. `mcsite_status=trace`.
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            use_color: true,
            show_target: false,
            show_timestamp: true,
            filter: None,
        }
    }
}

/// Value of the `log_type` field attached to every tracing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogType {
    Status,
    Poller,
    Webhook,
    Config,
    Cli,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Status => "status",
            LogType::Poller => "poller",
            LogType::Webhook => "webhook",
            LogType::Config => "config",
            LogType::Cli => "cli",
        }
    }
}
