// Copyright (C) 2015-2025 The Neo Project.
//
// main.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Dynex node watcher
//!
//! Connects a [`NodeRpcProxy`] to a daemon and logs what the proxy observes
//! until interrupted.

use anyhow::{anyhow, Context, Result};
use dynex_node_proxy::{ConnectivityObserver, NodeObserver, NodeRpcProxy};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod settings;
mod watch;

use watch::{format_timestamp, LoggingObserver};

const STATUS_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    let matches = settings::command().get_matches();
    init_logging(matches.get_flag("json-logs"));

    let config = settings::resolve(&matches)?;
    info!(
        endpoint = %config.endpoint,
        timeout_ms = config.rpc_timeout.as_millis() as u64,
        pull_interval_ms = config.pull_interval.as_millis() as u64,
        "starting node watcher"
    );

    if let Err(e) = run(config).await {
        error!(error = %e, "node watcher failed");
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: dynex_config::ProxyConfig) -> Result<()> {
    let proxy = Arc::new(NodeRpcProxy::with_config(config)?);

    let observer = Arc::new(LoggingObserver);
    let node_observer: Arc<dyn NodeObserver> = observer.clone();
    let connectivity_observer: Arc<dyn ConnectivityObserver> = observer;
    proxy.add_observer(&node_observer);
    proxy.add_connectivity_observer(&connectivity_observer);

    let (tx, rx) = oneshot::channel();
    proxy.init(move |result| {
        let _ = tx.send(result);
    });
    rx.await
        .map_err(|_| anyhow!("initialization callback dropped"))?
        .context("failed to connect to node")?;

    let header = proxy.last_local_block_header_info();
    info!(
        height = header.index,
        hash = %header.hash,
        time = %format_timestamp(header.timestamp),
        known_height = proxy.last_known_block_height(),
        "proxy initialized"
    );

    let mut status = tokio::time::interval(STATUS_INTERVAL);
    status.tick().await;
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("received shutdown signal");
                break;
            }
            _ = status.tick() => report_status(&proxy),
        }
    }

    // Shutdown joins the proxy worker thread.
    let stopping = proxy.clone();
    tokio::task::spawn_blocking(move || stopping.shutdown())
        .await
        .context("proxy shutdown task failed")?;
    info!("node watcher stopped");
    Ok(())
}

fn report_status(proxy: &NodeRpcProxy) {
    let local = proxy.last_local_block_height();
    let known = proxy.last_known_block_height();
    info!(
        local_height = local,
        known_height = known,
        peers = proxy.peer_count(),
        minimal_fee = proxy.minimal_fee(),
        last_block = %format_timestamp(proxy.last_local_block_timestamp()),
        "node status"
    );
    if known > local {
        warn!(behind = known - local, "node is behind the network");
    }
}
