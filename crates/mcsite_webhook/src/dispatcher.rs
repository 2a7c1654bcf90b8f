use std::sync::Arc;

use mcsite_config::{LogType, WebhooksConfig};
use reqwest::{Client, StatusCode, redirect};
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{Instrument, debug, debug_span, warn};

use crate::error::WebhookError;
use crate::event::WebhookEventKind;
use crate::payload::WebhookPayload;

#[derive(Debug)]
pub enum DeliveryOutcome {
    /// No destination configured for the event kind; nothing was sent.
    Skipped,
    Delivered(StatusCode),
    Failed(WebhookError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered(_))
    }
}

#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    client: Client,
    config: Arc<WebhooksConfig>,
}

impl WebhookDispatcher {
    pub fn new(config: WebhooksConfig) -> Result<Self, WebhookError> {
        // One POST per event: a 3xx is reported, never followed.
        let client = Client::builder()
            .user_agent(concat!("mcsite-webhook/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: WebhooksConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn destination(&self, kind: WebhookEventKind) -> Option<&str> {
        self.config.destination(kind.as_str())
    }

    /// Notifies the destination for `kind` without waiting for it.
    ///
    /// Returns immediately. When no destination is configured, or no Tokio
    /// runtime is running, nothing is sent. The delivery result is only
    /// logged; callers never see it.
    pub fn dispatch(&self, kind: WebhookEventKind, data: Value) {
        if self.destination(kind).is_none() {
            debug!(
                log_type = LogType::Webhook.as_str(),
                "No webhook configured for {}, skipping", kind
            );
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!(
                log_type = LogType::Webhook.as_str(),
                "Webhook for {} dropped: no async runtime", kind
            );
            return;
        };

        let dispatcher = self.clone();
        let span = debug_span!("webhook_dispatch", event = %kind);
        // Detached: the outcome is logged by `deliver` and otherwise discarded.
        drop(runtime.spawn(
            async move {
                let _ = dispatcher.deliver(kind, data).await;
            }
            .instrument(span),
        ));
    }

    /// Sends the webhook for `kind` and reports what happened. Never errors;
    /// failures come back as [`DeliveryOutcome::Failed`].
    pub async fn deliver(&self, kind: WebhookEventKind, data: Value) -> DeliveryOutcome {
        let Some(url) = self.destination(kind) else {
            return DeliveryOutcome::Skipped;
        };

        let payload = WebhookPayload::new(kind, data);
        let outcome = match self.post(url, &payload).await {
            Ok(status) => DeliveryOutcome::Delivered(status),
            Err(e) => DeliveryOutcome::Failed(e),
        };

        match &outcome {
            DeliveryOutcome::Delivered(status) => debug!(
                log_type = LogType::Webhook.as_str(),
                "Webhook {} delivered ({})", kind, status
            ),
            DeliveryOutcome::Failed(e) => warn!(
                log_type = LogType::Webhook.as_str(),
                "Webhook {} not delivered: {}", kind, e
            ),
            DeliveryOutcome::Skipped => {}
        }

        outcome
    }

    async fn post(&self, url: &str, payload: &WebhookPayload) -> Result<StatusCode, WebhookError> {
        let response = self
            .client
            .post(url)
            .timeout(self.config.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::UnexpectedStatus(status));
        }
        Ok(status)
    }
}
