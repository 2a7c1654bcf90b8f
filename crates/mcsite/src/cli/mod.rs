pub mod commands;
pub mod render;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mcsite_config::{LogType, SiteConfig, try_load_config};
use mcsite_webhook::{WebhookEventKind, apply_process_env};
use tracing::debug;

use crate::telemetry;

#[derive(Debug, Parser)]
#[command(
    name = "mcsite",
    version,
    about = "Check Minecraft server status and deliver site webhooks"
)]
pub struct Cli {
    /// Configuration file (defaults to ./config.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the status of one or more servers
    Status(StatusArgs),

    /// Send or inspect webhooks
    #[command(subcommand)]
    Webhook(WebhookCommand),
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Server addresses, `hostname` or `hostname:port`
    #[arg(required = true)]
    pub hosts: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Keep polling and reprint on every refresh until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Per-provider timeout, e.g. `8s` (overrides the configuration)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Refresh interval while watching (overrides the configuration)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Age after which a result is shown as loading again
    #[arg(long, value_parser = humantime::parse_duration)]
    pub stale_after: Option<Duration>,
}

#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    /// Deliver one webhook and wait for the outcome
    Send {
        /// Event name, e.g. `changelog.created`
        event: WebhookEventKind,

        /// JSON object sent as the payload's `data`
        #[arg(long, default_value = "{}")]
        data: String,
    },

    /// List event kinds, their environment variables and destinations
    List,
}

/// Loads configuration, installs logging and runs the selected command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load(&cli)?;
    telemetry::init_logging(&config.logging)?;

    debug!(
        log_type = LogType::Cli.as_str(),
        "Running {:?} with {:?}", cli.command, config.status
    );

    match cli.command {
        Command::Status(args) => {
            apply_status_overrides(&mut config, &args);
            config.validate()?;
            commands::status::run(&args, &config).await
        }
        Command::Webhook(command) => commands::webhook::run(command, &config).await,
    }
}

fn load(cli: &Cli) -> anyhow::Result<SiteConfig> {
    let mut config = try_load_config(cli.config.as_deref())?;
    if cli.debug {
        config.logging.debug = true;
    }
    apply_process_env(&mut config.webhooks);
    Ok(config)
}

fn apply_status_overrides(config: &mut SiteConfig, args: &StatusArgs) {
    if let Some(timeout) = args.timeout {
        config.status.timeout = timeout;
    }
    if let Some(interval) = args.interval {
        config.status.refresh_interval = interval;
    }
    if let Some(stale_after) = args.stale_after {
        config.status.stale_after = stale_after;
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_status_overrides() {
        let cli = Cli::try_parse_from([
            "mcsite",
            "status",
            "play.example.com",
            "hub.example.com:25566",
            "--timeout",
            "2s",
            "--interval",
            "1m",
        ])
        .unwrap();

        let Command::Status(args) = cli.command else {
            panic!("expected status command");
        };
        assert_eq!(args.hosts, vec!["play.example.com", "hub.example.com:25566"]);

        let mut config = SiteConfig::default();
        apply_status_overrides(&mut config, &args);
        assert_eq!(config.status.timeout, Duration::from_secs(2));
        assert_eq!(config.status.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.status.stale_after, Duration::from_secs(15));
    }

    #[test]
    fn test_status_requires_a_host() {
        assert!(Cli::try_parse_from(["mcsite", "status"]).is_err());
    }

    #[test]
    fn test_webhook_event_parsed() {
        let cli = Cli::try_parse_from([
            "mcsite",
            "--debug",
            "webhook",
            "send",
            "news.published",
            "--data",
            r#"{"slug":"launch"}"#,
        ])
        .unwrap();

        assert!(cli.debug);
        match cli.command {
            Command::Webhook(WebhookCommand::Send { event, data }) => {
                assert_eq!(event, WebhookEventKind::NewsPublished);
                assert_eq!(data, r#"{"slug":"launch"}"#);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_webhook_event_rejected() {
        assert!(Cli::try_parse_from(["mcsite", "webhook", "send", "forum.exploded"]).is_err());
    }
}
