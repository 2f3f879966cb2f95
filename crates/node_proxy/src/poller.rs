// Copyright (C) 2015-2025 The Neo Project.
//
// poller.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Background refresh of the cached chain view.

use crate::error::NodeResult;
use crate::pool::KnownTransactions;
use crate::proxy::Shared;
use crate::scheduler::StopSignal;
use dynex_core::BlockHeaderInfo;
use dynex_rpc_client::models::{
    GetInfoRequest, GetInfoResponse, GetLastBlockHeaderRequest, GetPoolChangesRequest,
};
use dynex_rpc_client::NodeRpcClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Owns the known-transaction set and keeps the shared snapshot current.
pub(crate) struct NodeStatusPoller {
    shared: Arc<Shared>,
    client: Arc<NodeRpcClient>,
    stop: StopSignal,
    known_txs: KnownTransactions,
    /// Set when the node reported our tail block as outdated.
    header_stale: bool,
    connected: bool,
}

impl NodeStatusPoller {
    pub fn new(shared: Arc<Shared>, client: Arc<NodeRpcClient>, stop: StopSignal) -> Self {
        Self {
            shared,
            client,
            stop,
            known_txs: KnownTransactions::default(),
            header_stale: true,
            connected: false,
        }
    }

    /// Pulls every `interval` until stopped. Failures are logged and retried
    /// on the next tick.
    pub async fn run(mut self, interval: Duration) {
        debug!(?interval, "node status poller started");
        let stop = self.stop.clone();
        loop {
            tokio::select! {
                biased;
                _ = stop.wait() => break,
                _ = tokio::time::sleep(interval) => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = stop.wait() => break,
                outcome = self.pull() => outcome,
            };
            if let Err(err) = outcome {
                warn!(error = %err, "node status pull failed");
            }
        }

        self.finish();
    }

    /// Reports the loss of connectivity to observers that saw it established.
    pub fn finish(mut self) {
        self.update_connectivity(false);
        debug!("node status poller stopped");
    }

    /// One refresh: node status, then the top block header when needed, then the pool diff.
    pub async fn pull(&mut self) -> NodeResult<()> {
        let info = match self.client.call(&GetInfoRequest::default()).await {
            Ok(info) => info,
            Err(err) => {
                if err.is_transient() {
                    self.update_connectivity(false);
                }
                return Err(err.into());
            }
        };

        let node_advanced = self.update_node_status(&info);
        self.update_connectivity(info.peer_count() > 0);

        let tail_unknown = self.shared.snapshot.last_local_header().hash.is_zero();
        if node_advanced || self.header_stale || tail_unknown {
            self.update_blockchain_status().await?;
        }

        self.update_pool_status().await
    }

    /// Returns `true` when the node's local height advanced.
    fn update_node_status(&self, info: &GetInfoResponse) -> bool {
        let snapshot = &self.shared.snapshot;
        snapshot.set_minimal_fee(info.min_fee);

        let peer_count = info.peer_count();
        if snapshot.set_peer_count(peer_count) {
            trace!(peer_count, "peer count changed");
            self.shared
                .observers
                .notify(|o| o.peer_count_updated(peer_count));
        }

        let known_height = info.network_height.max(info.height);
        if snapshot.advance_network_height(known_height) {
            self.shared
                .observers
                .notify(|o| o.last_known_block_height_updated(known_height));
        }

        snapshot.advance_node_height(info.height)
    }

    async fn update_blockchain_status(&mut self) -> NodeResult<()> {
        let response = self
            .client
            .call(&GetLastBlockHeaderRequest::default())
            .await?;
        let header = BlockHeaderInfo::from(response.block_header);
        let previous = self.shared.snapshot.replace_last_local_header(header.clone());
        self.header_stale = false;

        if previous.hash != header.hash {
            debug!(height = header.index, hash = %header.hash, "local chain tip updated");
            self.shared
                .observers
                .notify(|o| o.local_blockchain_updated(header.index));
            self.shared
                .observers
                .notify(|o| o.block_header_updated(&header));
        }
        Ok(())
    }

    async fn update_pool_status(&mut self) -> NodeResult<()> {
        let request = GetPoolChangesRequest {
            tail_block_id: self.shared.snapshot.last_local_header().hash,
            known_txs_ids: self.known_txs.to_vec(),
        };
        let response = self.client.call(&request).await?;

        if !response.is_tail_block_actual {
            // The chain moved under us; the header is refreshed next tick.
            trace!("pool diff computed against an outdated tail block");
            self.header_stale = true;
            return Ok(());
        }

        let update = self.known_txs.apply(
            response.added_txs.iter().map(|tx| tx.hash()),
            response.deleted_txs_ids,
        );
        if !update.is_empty() {
            debug!(
                added = update.added.len(),
                removed = update.removed.len(),
                known = self.known_txs.len(),
                "pool changed"
            );
            self.shared
                .observers
                .notify(|o| o.pool_changed(&update.added, &update.removed));
        }
        Ok(())
    }

    fn update_connectivity(&mut self, connected: bool) {
        if self.connected == connected {
            return;
        }
        self.connected = connected;
        info!(connected, "node connectivity changed");
        self.shared
            .connectivity
            .notify(|o| o.connection_status_updated(connected));
    }
}
