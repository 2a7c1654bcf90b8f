use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Domain events the site can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEventKind {
    ForumThreadCreated,
    ForumPostCreated,
    NewsPublished,
    NewsUpdated,
    NewsDeleted,
    WikiPageCreated,
    WikiPageUpdated,
    WikiPageDeleted,
    ChangelogCreated,
    ChangelogUpdated,
    ChangelogDeleted,
    EventCreated,
    UserRoleChanged,
    UserBanned,
    SettingsUpdated,
    MaintenanceToggled,
}

impl WebhookEventKind {
    pub const ALL: [WebhookEventKind; 16] = [
        WebhookEventKind::ForumThreadCreated,
        WebhookEventKind::ForumPostCreated,
        WebhookEventKind::NewsPublished,
        WebhookEventKind::NewsUpdated,
        WebhookEventKind::NewsDeleted,
        WebhookEventKind::WikiPageCreated,
        WebhookEventKind::WikiPageUpdated,
        WebhookEventKind::WikiPageDeleted,
        WebhookEventKind::ChangelogCreated,
        WebhookEventKind::ChangelogUpdated,
        WebhookEventKind::ChangelogDeleted,
        WebhookEventKind::EventCreated,
        WebhookEventKind::UserRoleChanged,
        WebhookEventKind::UserBanned,
        WebhookEventKind::SettingsUpdated,
        WebhookEventKind::MaintenanceToggled,
    ];

    /// Name sent in the payload's `event` field and used as the
    /// configuration key.
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventKind::ForumThreadCreated => "forum.thread_created",
            WebhookEventKind::ForumPostCreated => "forum.post_created",
            WebhookEventKind::NewsPublished => "news.published",
            WebhookEventKind::NewsUpdated => "news.updated",
            WebhookEventKind::NewsDeleted => "news.deleted",
            WebhookEventKind::WikiPageCreated => "wiki.page_created",
            WebhookEventKind::WikiPageUpdated => "wiki.page_updated",
            WebhookEventKind::WikiPageDeleted => "wiki.page_deleted",
            WebhookEventKind::ChangelogCreated => "changelog.created",
            WebhookEventKind::ChangelogUpdated => "changelog.updated",
            WebhookEventKind::ChangelogDeleted => "changelog.deleted",
            WebhookEventKind::EventCreated => "event.created",
            WebhookEventKind::UserRoleChanged => "user.role_changed",
            WebhookEventKind::UserBanned => "user.banned",
            WebhookEventKind::SettingsUpdated => "settings.updated",
            WebhookEventKind::MaintenanceToggled => "settings.maintenance_toggled",
        }
    }

    /// `changelog.created` -> `WEBHOOK_CHANGELOG_CREATED`.
    pub fn env_var(&self) -> String {
        format!(
            "WEBHOOK_{}",
            self.as_str().replace('.', "_").to_ascii_uppercase()
        )
    }
}

impl fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown webhook event '{0}'")]
pub struct UnknownEventKind(pub String);

impl FromStr for WebhookEventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WebhookEventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}
