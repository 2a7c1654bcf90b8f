use mcsite_config::LoggingConfig;
use tracing_subscriber::{
    EnvFilter,
    util::{SubscriberInitExt, TryInitError},
};

const DEFAULT_DIRECTIVE: &str = "info";

/// `RUST_LOG` wins over the configured filter, which wins over the
/// `debug` switch.
pub fn filter_directive(config: &LoggingConfig, rust_log: Option<&str>) -> String {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directive.to_string();
    }

    let level = if config.debug { "debug" } else { DEFAULT_DIRECTIVE };
    match config.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(extra) => format!("{},{}", level, extra),
        None => level.to_string(),
    }
}

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(config, rust_log.as_deref());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.use_color)
        .with_target(config.show_target)
        .with_writer(std::io::stderr);

    if config.show_timestamp {
        builder.finish().try_init()
    } else {
        builder.without_time().finish().try_init()
    }
}
