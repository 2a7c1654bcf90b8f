use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, debug_span, warn};

use crate::resolver::StatusResolver;
use crate::snapshot::ServerStatusSnapshot;
use mcsite_config::{LogType, StatusConfig};

/// Shortest refresh interval a poller accepts; shorter ones are raised to it.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct PolledStatus {
    pub snapshot: ServerStatusSnapshot,
    pub fetched_at: Instant,
}

/// What a page should render for a watched host.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusView {
    /// Nothing fetched yet, or the last result is older than the
    /// staleness window.
    Loading,
    Ready(ServerStatusSnapshot),
}

/// Re-resolves watched hosts on a fixed interval.
///
/// Every watched host gets its own task and channel; the only thing the
/// tasks share is the resolver, which is stateless.
#[derive(Debug, Clone)]
pub struct StatusPoller {
    resolver: StatusResolver,
    refresh_interval: Duration,
    stale_after: Duration,
    shutdown: CancellationToken,
}

impl StatusPoller {
    /// `refresh_interval` below [`MIN_REFRESH_INTERVAL`] (including zero) is
    /// clamped to it.
    pub fn new(
        resolver: StatusResolver,
        refresh_interval: Duration,
        stale_after: Duration,
    ) -> Self {
        if refresh_interval < MIN_REFRESH_INTERVAL {
            warn!(
                log_type = LogType::Poller.as_str(),
                "Refresh interval {:?} too short, using {:?}",
                refresh_interval,
                MIN_REFRESH_INTERVAL
            );
        }

        Self {
            resolver,
            refresh_interval: refresh_interval.max(MIN_REFRESH_INTERVAL),
            stale_after,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn from_config(resolver: StatusResolver, config: &StatusConfig) -> Self {
        Self::new(resolver, config.refresh_interval, config.stale_after)
    }

    /// Starts polling `host`. Resolution begins immediately; the task ends
    /// once the returned watch and all its clones are dropped, or on
    /// [`StatusPoller::shutdown`].
    pub fn watch(&self, host: &str) -> StatusWatch {
        let (tx, rx) = watch::channel(None);
        let resolver = self.resolver.clone();
        let refresh_interval = self.refresh_interval;
        let shutdown = self.shutdown.clone();
        let host = host.to_string();

        let span = debug_span!("status_poller", host = %host);
        tokio::spawn(
            async move {
                let mut ticker = time::interval(refresh_interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tx.closed() => break,
                        _ = ticker.tick() => {}
                    }

                    let snapshot = tokio::select! {
                        _ = shutdown.cancelled() => break,
                        snapshot = resolver.resolve(&host) => snapshot,
                    };

                    let polled = PolledStatus {
                        snapshot,
                        fetched_at: Instant::now(),
                    };
                    if tx.send(Some(polled)).is_err() {
                        break;
                    }
                }

                debug!(
                    log_type = LogType::Poller.as_str(),
                    "Stopped polling {}", host
                );
            }
            .instrument(span),
        );

        StatusWatch {
            rx,
            stale_after: self.stale_after,
        }
    }

    /// Stops every task started by this poller and its clones.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Clone)]
pub struct StatusWatch {
    rx: watch::Receiver<Option<PolledStatus>>,
    stale_after: Duration,
}

impl StatusWatch {
    pub fn current(&self) -> StatusView {
        match &*self.rx.borrow() {
            Some(polled) if polled.fetched_at.elapsed() <= self.stale_after => {
                StatusView::Ready(polled.snapshot.clone())
            }
            _ => StatusView::Loading,
        }
    }

    /// Latest result regardless of age.
    pub fn latest(&self) -> Option<PolledStatus> {
        self.rx.borrow().clone()
    }

    /// Waits for the next result. Returns `false` once polling has stopped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::provider::MockStatusProvider;

    fn poller(provider: &MockStatusProvider) -> StatusPoller {
        let resolver = StatusResolver::with_providers(
            vec![Arc::new(provider.clone())],
            Duration::from_secs(8),
        );
        StatusPoller::new(resolver, Duration::from_secs(30), Duration::from_secs(15))
    }

    fn fixture(host: &str) -> ServerStatusSnapshot {
        ServerStatusSnapshot {
            online: true,
            host: host.to_string(),
            port: Some(25565),
            version: None,
            players: None,
            latency: None,
            motd: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_until_first_result() {
        let provider = MockStatusProvider::new("mock")
            .with_server("play.example.com", fixture("play.example.com"));
        let mut watch = poller(&provider).watch("play.example.com");

        assert_eq!(watch.current(), StatusView::Loading);
        assert!(watch.changed().await);
        assert_eq!(
            watch.current(),
            StatusView::Ready(fixture("play.example.com"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_on_interval() {
        let provider = MockStatusProvider::new("mock")
            .with_server("play.example.com", fixture("play.example.com"));
        let mut watch = poller(&provider).watch("play.example.com");

        assert!(watch.changed().await);
        assert_eq!(provider.calls(), 1);

        assert!(watch.changed().await);
        assert_eq!(provider.calls(), 2);
        assert!(watch.latest().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_goes_stale_between_refreshes() {
        let provider = MockStatusProvider::new("mock")
            .with_server("play.example.com", fixture("play.example.com"));
        let mut watch = poller(&provider).watch("play.example.com");
        assert!(watch.changed().await);

        time::sleep(Duration::from_secs(10)).await;
        assert!(matches!(watch.current(), StatusView::Ready(_)));

        time::sleep(Duration::from_secs(6)).await;
        assert_eq!(watch.current(), StatusView::Loading);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_polling() {
        let provider = MockStatusProvider::new("mock")
            .with_server("play.example.com", fixture("play.example.com"));
        let poller = poller(&provider);
        let mut watch = poller.watch("play.example.com");
        assert!(watch.changed().await);

        poller.shutdown();
        assert!(!watch.changed().await);

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_watch_stops_polling() {
        let provider = MockStatusProvider::new("mock")
            .with_server("play.example.com", fixture("play.example.com"));
        let mut watch = poller(&provider).watch("play.example.com");
        assert!(watch.changed().await);
        drop(watch);

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hosts_polled_independently() {
        let provider = MockStatusProvider::new("mock")
            .with_server("host1", fixture("host1"))
            .with_server("host2", fixture("host2"));
        let poller = poller(&provider);
        let mut first = poller.watch("host1");
        let mut second = poller.watch("host2");

        assert!(first.changed().await);
        assert!(second.changed().await);
        assert_eq!(first.current(), StatusView::Ready(fixture("host1")));
        assert_eq!(second.current(), StatusView::Ready(fixture("host2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_clamped() {
        let provider = MockStatusProvider::new("mock")
            .with_server("play.example.com", fixture("play.example.com"));
        let resolver =
            StatusResolver::with_providers(vec![Arc::new(provider.clone())], Duration::from_secs(8));
        let poller = StatusPoller::new(resolver, Duration::ZERO, Duration::from_secs(15));
        assert_eq!(poller.refresh_interval(), MIN_REFRESH_INTERVAL);

        let started = Instant::now();
        let mut watch = poller.watch("play.example.com");
        assert!(watch.changed().await);
        assert!(watch.changed().await);

        assert_eq!(provider.calls(), 2);
        assert!(started.elapsed() >= MIN_REFRESH_INTERVAL);
    }
}
