use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::event::WebhookEventKind;

/// Body of every webhook POST.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub event: &'static str,
    /// RFC 3339, UTC, millisecond precision (`2024-05-01T12:00:00.000Z`).
    pub timestamp: String,
    pub data: Value,
}

impl WebhookPayload {
    pub fn new(kind: WebhookEventKind, data: Value) -> Self {
        Self::at(kind, data, Utc::now())
    }

    pub fn at(kind: WebhookEventKind, data: Value, at: DateTime<Utc>) -> Self {
        Self {
            event: kind.as_str(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payload_shape() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let payload = WebhookPayload::at(
            WebhookEventKind::ChangelogCreated,
            json!({ "id": 7, "title": "1.4.0" }),
            at,
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "event": "changelog.created",
                "timestamp": "2024-05-01T12:30:00.000Z",
                "data": { "id": 7, "title": "1.4.0" }
            })
        );
    }
}
