//! Answers "is this Minecraft server up, and what are its vitals" by asking
//! public status APIs, falling back from one provider to the next.
//!
//! The entry point is [`StatusResolver::resolve`], which never fails: a
//! server nobody can reach resolves to [`ServerStatusSnapshot::unreachable`].
//! [`StatusPoller`] layers the refresh/staleness policy the site's pages use
//! on top of it.

mod error;
mod poller;
mod provider;
mod resolver;
mod snapshot;

pub use error::*;
pub use poller::*;
pub use provider::*;
pub use resolver::*;
pub use snapshot::*;
