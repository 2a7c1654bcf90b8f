use mcsite_config::{LogType, WebhooksConfig};
use tracing::debug;

use crate::event::WebhookEventKind;

/// Overlays `WEBHOOK_<KIND>` variables onto `config`, reading them through
/// `lookup`. Values from the lookup replace file-configured destinations;
/// blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut WebhooksConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for kind in WebhookEventKind::ALL {
        let var = kind.env_var();
        let Some(url) = lookup(&var).filter(|url| !url.trim().is_empty()) else {
            continue;
        };

        debug!(
            log_type = LogType::Webhook.as_str(),
            "Webhook destination for {} taken from {}", kind, var
        );
        config.destinations.insert(kind.as_str().to_string(), url);
    }
}

/// [`apply_env_overrides`] against the process environment.
pub fn apply_process_env(config: &mut WebhooksConfig) {
    apply_env_overrides(config, |var| std::env::var(var).ok());
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_env_overrides_file_destinations() {
        let mut config = WebhooksConfig::default();
        config.destinations.insert(
            "news.published".to_string(),
            "https://file.example.com/news".to_string(),
        );
        config.destinations.insert(
            "changelog.created".to_string(),
            "https://file.example.com/changelog".to_string(),
        );

        let env: HashMap<&str, &str> = HashMap::from([
            ("WEBHOOK_NEWS_PUBLISHED", "https://env.example.com/news"),
            ("WEBHOOK_USER_BANNED", "https://env.example.com/bans"),
            ("WEBHOOK_WIKI_PAGE_CREATED", "   "),
        ]);
        apply_env_overrides(&mut config, |var| env.get(var).map(|v| v.to_string()));

        assert_eq!(
            config.destination("news.published"),
            Some("https://env.example.com/news")
        );
        assert_eq!(
            config.destination("changelog.created"),
            Some("https://file.example.com/changelog")
        );
        assert_eq!(
            config.destination("user.banned"),
            Some("https://env.example.com/bans")
        );
        assert_eq!(config.destination("wiki.page_created"), None);
    }
}
