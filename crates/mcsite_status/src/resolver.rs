use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::time;
use tracing::{debug, instrument, warn};

use crate::error::StatusError;
use crate::provider::{McSrvStatProvider, McStatusProvider, StatusProvider};
use crate::snapshot::ServerStatusSnapshot;
use mcsite_config::{LogType, StatusConfig};

/// Resolves server status through an ordered chain of providers.
///
/// Providers are tried strictly in order; the first decodable answer wins.
/// Each attempt is bounded by `timeout` and dropped (aborting its request)
/// when it elapses. The resolver holds no per-call state, so clones can be
/// used concurrently for any number of hosts.
#[derive(Clone)]
pub struct StatusResolver {
    providers: Vec<Arc<dyn StatusProvider>>,
    timeout: Duration,
}

impl StatusResolver {
    /// mcstatus.io first, then mcsrvstat.us.
    pub fn from_config(config: &StatusConfig) -> Result<Self, StatusError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        let primary = McStatusProvider::new(client.clone(), &config.primary_url)?;
        let fallback = McSrvStatProvider::new(client, &config.fallback_url)?;

        Ok(Self::with_providers(
            vec![Arc::new(primary), Arc::new(fallback)],
            config.timeout,
        ))
    }

    pub fn with_providers(providers: Vec<Arc<dyn StatusProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Never fails: when every provider errors or times out the result is
    /// [`ServerStatusSnapshot::unreachable`].
    #[instrument(name = "resolve_status", skip(self), fields(timeout = ?self.timeout))]
    pub async fn resolve(&self, host: &str) -> ServerStatusSnapshot {
        for provider in &self.providers {
            match self.attempt(provider.as_ref(), host).await {
                Ok(snapshot) => {
                    debug!(
                        log_type = LogType::Status.as_str(),
                        provider = provider.name(),
                        online = snapshot.online,
                        "Resolved status for {}",
                        host
                    );
                    return snapshot;
                }
                Err(e) => {
                    warn!(
                        log_type = LogType::Status.as_str(),
                        provider = provider.name(),
                        "Status lookup for {} failed: {}",
                        host,
                        e
                    );
                }
            }
        }

        debug!(
            log_type = LogType::Status.as_str(),
            "No provider could resolve {}, reporting it unreachable", host
        );
        ServerStatusSnapshot::unreachable(host)
    }

    async fn attempt(
        &self,
        provider: &dyn StatusProvider,
        host: &str,
    ) -> Result<ServerStatusSnapshot, StatusError> {
        match time::timeout(self.timeout, provider.fetch(host)).await {
            Ok(result) => result,
            Err(_) => Err(StatusError::Timeout(self.timeout)),
        }
    }
}

impl std::fmt::Debug for StatusResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusResolver")
            .field("providers", &self.provider_names())
            .field("timeout", &self.timeout)
            .finish()
    }
}
