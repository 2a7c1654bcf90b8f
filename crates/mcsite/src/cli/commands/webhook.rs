use anyhow::{Context, bail};
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use mcsite_config::SiteConfig;
use mcsite_webhook::{DeliveryOutcome, WebhookDispatcher, WebhookEventKind};
use serde_json::Value;

use crate::cli::WebhookCommand;

pub async fn run(command: WebhookCommand, config: &SiteConfig) -> anyhow::Result<()> {
    let dispatcher = WebhookDispatcher::new(config.webhooks.clone())
        .context("failed to build webhook client")?;

    match command {
        WebhookCommand::Send { event, data } => send(&dispatcher, event, &data).await,
        WebhookCommand::List => {
            println!("{}", destinations_table(&dispatcher));
            Ok(())
        }
    }
}

pub fn parse_data(data: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    if !value.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(value)
}

async fn send(
    dispatcher: &WebhookDispatcher,
    event: WebhookEventKind,
    data: &str,
) -> anyhow::Result<()> {
    let data = parse_data(data)?;

    match dispatcher.deliver(event, data).await {
        DeliveryOutcome::Delivered(status) => {
            println!("{} delivered ({})", event, status);
            Ok(())
        }
        DeliveryOutcome::Skipped => {
            println!(
                "{} has no destination; set {} or webhooks.destinations.\"{}\"",
                event,
                event.env_var(),
                event
            );
            Ok(())
        }
        DeliveryOutcome::Failed(e) => bail!("{} not delivered: {}", event, e),
    }
}

pub fn destinations_table(dispatcher: &WebhookDispatcher) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Event", "Environment variable", "Destination"]);

    for kind in WebhookEventKind::ALL {
        table.add_row(vec![
            kind.as_str().to_string(),
            kind.env_var(),
            dispatcher.destination(kind).unwrap_or("-").to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use mcsite_config::WebhooksConfig;

    use super::*;

    #[test]
    fn test_parse_data() {
        assert_eq!(parse_data(r#"{"id": 3}"#).unwrap()["id"], 3);
        assert!(parse_data("[1, 2]").is_err());
        assert!(parse_data("{oops").is_err());
    }

    #[test]
    fn test_destinations_table() {
        let mut config = WebhooksConfig::default();
        config.destinations.insert(
            "changelog.created".to_string(),
            "https://hooks.example.com/changelog".to_string(),
        );
        let dispatcher = WebhookDispatcher::new(config).unwrap();

        let rendered = destinations_table(&dispatcher).to_string();
        assert!(rendered.contains("WEBHOOK_CHANGELOG_CREATED"));
        assert!(rendered.contains("https://hooks.example.com/changelog"));
        assert!(rendered.contains("settings.maintenance_toggled"));
    }
}
