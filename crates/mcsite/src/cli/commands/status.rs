use std::collections::BTreeMap;

use anyhow::Context;
use futures_util::future::join_all;
use mcsite_config::{LogType, SiteConfig};
use mcsite_status::{ServerStatusSnapshot, StatusPoller, StatusResolver, StatusView};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{StatusArgs, render};

pub async fn run(args: &StatusArgs, config: &SiteConfig) -> anyhow::Result<()> {
    let resolver =
        StatusResolver::from_config(&config.status).context("failed to build status resolver")?;

    if args.watch {
        watch(args, config, resolver).await
    } else {
        let snapshots = resolve_all(&resolver, &args.hosts).await;
        print_snapshots(&snapshots, args.json)
    }
}

/// Resolves every host concurrently, results in input order.
pub async fn resolve_all(resolver: &StatusResolver, hosts: &[String]) -> Vec<ServerStatusSnapshot> {
    join_all(hosts.iter().map(|host| resolver.resolve(host))).await
}

fn print_snapshots(snapshots: &[ServerStatusSnapshot], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshots)?);
    } else {
        println!("{}", render::snapshot_table(snapshots));
    }
    Ok(())
}

async fn watch(
    args: &StatusArgs,
    config: &SiteConfig,
    resolver: StatusResolver,
) -> anyhow::Result<()> {
    let poller = StatusPoller::from_config(resolver, &config.status);
    let (tx, mut rx) = mpsc::channel::<(String, StatusView)>(32);

    let mut views: BTreeMap<String, StatusView> = BTreeMap::new();
    for host in &args.hosts {
        views.insert(host.clone(), StatusView::Loading);

        let mut watch = poller.watch(host);
        let tx = tx.clone();
        let host = host.clone();
        tokio::spawn(async move {
            while watch.changed().await {
                if tx.send((host.clone(), watch.current())).await.is_err() {
                    break;
                }
            }
        });
    }
    drop(tx);

    info!(
        log_type = LogType::Cli.as_str(),
        "Watching {} server(s) every {:?}, press Ctrl-C to stop",
        views.len(),
        config.status.refresh_interval
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!(log_type = LogType::Cli.as_str(), "Interrupted, stopping pollers");
                break;
            }
            update = rx.recv() => {
                let Some((host, view)) = update else { break };

                if args.json {
                    if let StatusView::Ready(snapshot) = &view {
                        println!("{}", serde_json::to_string(snapshot)?);
                    }
                }
                views.insert(host, view);

                if !args.json {
                    let table = render::view_table(views.iter().map(|(h, v)| (h.as_str(), v)));
                    println!("{}", table);
                }
            }
        }
    }

    poller.shutdown();
    Ok(())
}
