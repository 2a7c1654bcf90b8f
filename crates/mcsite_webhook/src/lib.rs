//! Fire-and-forget notifications for site events.
//!
//! A [`WebhookDispatcher`] posts `{event, timestamp, data}` to the URL
//! configured for an event kind. Unconfigured kinds are skipped and delivery
//! failures are dropped: the write that triggered the event has already
//! happened and is never affected by its webhook.

mod dispatcher;
mod env;
mod error;
mod event;
mod payload;

pub use dispatcher::{DeliveryOutcome, WebhookDispatcher};
pub use env::{apply_env_overrides, apply_process_env};
pub use error::WebhookError;
pub use event::{UnknownEventKind, WebhookEventKind};
pub use payload::WebhookPayload;
