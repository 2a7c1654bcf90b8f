use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::StatusError;
use crate::provider::StatusProvider;
use crate::snapshot::ServerStatusSnapshot;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Respond(ServerStatusSnapshot),
    Fail(String),
    /// Never completes; only a timeout gets the caller out.
    Hang,
}

/// Scripted provider for tests. Behaviors are set per host, with a fallback
/// for hosts that were never registered.
#[derive(Clone)]
pub struct MockStatusProvider {
    name: String,
    behaviors: Arc<RwLock<HashMap<String, MockBehavior>>>,
    default_behavior: MockBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockStatusProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            behaviors: Arc::new(RwLock::new(HashMap::new())),
            default_behavior: MockBehavior::Fail(format!("{} has no fixture", name)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider that fails every lookup.
    pub fn failing(name: &str) -> Self {
        Self::new(name)
    }

    /// A provider that never answers.
    pub fn hanging(name: &str) -> Self {
        Self::new(name).with_default(MockBehavior::Hang)
    }

    pub fn with_default(mut self, behavior: MockBehavior) -> Self {
        self.default_behavior = behavior;
        self
    }

    pub fn with_server(self, host: &str, snapshot: ServerStatusSnapshot) -> Self {
        self.set_behavior(host, MockBehavior::Respond(snapshot));
        self
    }

    pub fn set_behavior(&self, host: &str, behavior: MockBehavior) {
        if let Ok(mut behaviors) = self.behaviors.write() {
            behaviors.insert(host.to_string(), behavior);
        }
    }

    /// Number of `fetch` calls so far, across every clone.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn behavior_for(&self, host: &str) -> MockBehavior {
        self.behaviors
            .read()
            .ok()
            .and_then(|behaviors| behaviors.get(host).cloned())
            .unwrap_or_else(|| self.default_behavior.clone())
    }
}

#[async_trait]
impl StatusProvider for MockStatusProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, host: &str) -> Result<ServerStatusSnapshot, StatusError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior_for(host) {
            MockBehavior::Respond(snapshot) => Ok(snapshot),
            MockBehavior::Fail(message) => Err(StatusError::other(message)),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}
