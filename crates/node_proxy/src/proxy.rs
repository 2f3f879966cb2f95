// Copyright (C) 2015-2025 The Neo Project.
//
// proxy.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{NodeError, NodeResult};
use crate::lifecycle::Lifecycle;
use crate::observer::{ConnectivityObserver, NodeObserver, ObserverManager};
use crate::operations;
use crate::scheduler::Request;
use crate::snapshot::ChainSnapshot;
use crate::types::{
    ConnectionState, NewBlocks, PoolSymmetricDifference, QueriedBlocks, TimestampRange,
};
use crate::worker::{InitCompletion, WorkerContext};
use dynex_config::{NodeEndpoint, ProxyConfig};
use dynex_core::{
    BlockDetails, BlockHeaderInfo, Hash, MultisignatureOutput, OutsForAmount, Transaction,
    TransactionDetails,
};
use dynex_rpc_client::{NodeRpcClient, RequestTimeout, Url};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// State shared between the proxy handle and its worker thread.
#[derive(Default)]
pub(crate) struct Shared {
    pub lifecycle: Lifecycle,
    pub snapshot: ChainSnapshot,
    pub observers: ObserverManager<dyn NodeObserver>,
    pub connectivity: ObserverManager<dyn ConnectivityObserver>,
    pub fee_address: RwLock<String>,
}

/// Asynchronous access to a remote daemon.
///
/// Every operation returns immediately. Its completion callback fires exactly
/// once: on the worker thread with the outcome, or right away on the calling
/// thread with [`NodeError::NotInitialized`] (or [`NodeError::Interrupted`]
/// while shutting down) when the proxy is not [`ConnectionState::Initialized`].
///
/// The cached getters never block on the network; they reflect the last
/// successful poll.
pub struct NodeRpcProxy {
    shared: Arc<Shared>,
    endpoint: NodeEndpoint,
    base_url: Url,
    timeout: RequestTimeout,
    pull_interval: Duration,
}

impl NodeRpcProxy {
    /// Creates an idle proxy for `host:port` with default timings.
    pub fn new(host: impl Into<String>, port: u16) -> NodeResult<Self> {
        Self::with_config(ProxyConfig::new(NodeEndpoint::new(host, port)))
    }

    pub fn with_config(config: ProxyConfig) -> NodeResult<Self> {
        config
            .validate()
            .map_err(|e| NodeError::InvalidArgument(e.to_string()))?;
        let base_url = config
            .endpoint
            .base_url()
            .map_err(|e| NodeError::InvalidArgument(e.to_string()))?;

        Ok(Self {
            shared: Arc::new(Shared::default()),
            endpoint: config.endpoint,
            base_url,
            timeout: RequestTimeout::new(config.rpc_timeout),
            pull_interval: config.pull_interval,
        })
    }

    pub fn endpoint(&self) -> &NodeEndpoint {
        &self.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.lifecycle.state()
    }

    /// Timeout applied to each individual round-trip.
    pub fn rpc_timeout(&self) -> Duration {
        self.timeout.get()
    }

    /// Changes the round-trip timeout; takes effect on the next round-trip.
    ///
    /// Timeouts below one millisecond are raised to one millisecond.
    pub fn set_rpc_timeout(&self, timeout: Duration) {
        self.timeout.set(timeout);
    }

    pub fn pull_interval(&self) -> Duration {
        self.pull_interval
    }

    /// Starts the worker and returns without waiting for it.
    ///
    /// `callback` receives `Ok(())` once the first status pull succeeded and
    /// the proxy is [`ConnectionState::Initialized`]. On failure the proxy is
    /// back to [`ConnectionState::NotInitialized`] and `init` may be retried.
    pub fn init<F>(&self, callback: F)
    where
        F: FnOnce(NodeResult<()>) + Send + 'static,
    {
        if let Some(stale) = self.shared.lifecycle.take_stale_worker() {
            stale.stop_and_join();
        }

        let completion = InitCompletion::new(callback);
        let context = WorkerContext {
            shared: self.shared.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout.clone(),
            pull_interval: self.pull_interval,
        };

        match self
            .shared
            .lifecycle
            .start(|| context.spawn(completion.clone()))
        {
            Ok(()) => info!(endpoint = %self.endpoint, "node proxy initializing"),
            Err(err) => completion.complete(Err(err)),
        }
    }

    /// Stops polling, interrupts outstanding requests, joins the worker and
    /// clears the cached state.
    ///
    /// Returns `false` when there was nothing to shut down. Safe to call from
    /// any state and from several threads at once.
    pub fn shutdown(&self) -> bool {
        let Some(worker) = self.shared.lifecycle.begin_shutdown() else {
            return false;
        };

        worker.stop_and_join();
        self.shared.snapshot.reset();
        self.shared.fee_address.write().clear();
        self.shared.lifecycle.finish_shutdown();
        info!(endpoint = %self.endpoint, "node proxy shut down");
        true
    }

    pub fn add_observer(&self, observer: &Arc<dyn NodeObserver>) -> bool {
        self.shared.observers.add(observer)
    }

    /// Once this returns, `observer` receives no further notifications.
    pub fn remove_observer(&self, observer: &Arc<dyn NodeObserver>) -> bool {
        self.shared.observers.remove(observer)
    }

    pub fn add_connectivity_observer(&self, observer: &Arc<dyn ConnectivityObserver>) -> bool {
        self.shared.connectivity.add(observer)
    }

    pub fn remove_connectivity_observer(&self, observer: &Arc<dyn ConnectivityObserver>) -> bool {
        self.shared.connectivity.remove(observer)
    }

    pub fn peer_count(&self) -> usize {
        self.shared.snapshot.peer_count()
    }

    /// Index of the cached top block header.
    pub fn last_local_block_height(&self) -> u32 {
        self.shared.snapshot.last_local_height()
    }

    pub fn last_known_block_height(&self) -> u32 {
        self.shared.snapshot.network_height()
    }

    pub fn local_block_count(&self) -> u32 {
        self.last_local_block_height().saturating_add(1)
    }

    pub fn known_block_count(&self) -> u32 {
        self.last_known_block_height().saturating_add(1)
    }

    pub fn last_local_block_timestamp(&self) -> u64 {
        self.shared.snapshot.last_local_timestamp()
    }

    pub fn minimal_fee(&self) -> u64 {
        self.shared.snapshot.minimal_fee()
    }

    /// Height the node reported in its last status.
    pub fn node_height(&self) -> u32 {
        self.shared.snapshot.node_height()
    }

    pub fn last_local_block_header_info(&self) -> BlockHeaderInfo {
        self.shared.snapshot.last_local_header()
    }

    /// Fee address cached by the last [`NodeRpcProxy::get_fee_address`].
    pub fn fee_address(&self) -> String {
        self.shared.fee_address.read().clone()
    }

    fn schedule<T, P, Fut, C>(&self, procedure: P, callback: C)
    where
        P: FnOnce(Arc<NodeRpcClient>) -> Fut + Send + 'static,
        Fut: Future<Output = NodeResult<T>> + Send + 'static,
        C: FnOnce(NodeResult<T>) + Send + 'static,
        T: Send + 'static,
    {
        self.shared
            .lifecycle
            .dispatch(Box::new(Request::new(procedure, callback)));
    }

    /// Fetches the node's fee address and caches it for [`NodeRpcProxy::fee_address`].
    pub fn get_fee_address<C>(&self, callback: C)
    where
        C: FnOnce(NodeResult<String>) + Send + 'static,
    {
        let shared = self.shared.clone();
        self.schedule(
            move |client| async move {
                let address = operations::fee_address(&client).await?;
                *shared.fee_address.write() = address.clone();
                Ok(address)
            },
            callback,
        );
    }

    /// Submits a serialized transaction to the node's pool.
    pub fn relay_transaction<C>(&self, transaction: Transaction, callback: C)
    where
        C: FnOnce(NodeResult<()>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::relay_transaction(&client, transaction).await },
            callback,
        );
    }

    /// Random outputs for ring signatures, `outs_count` per amount.
    pub fn get_random_outs_by_amounts<C>(&self, amounts: Vec<u64>, outs_count: u64, callback: C)
    where
        C: FnOnce(NodeResult<Vec<OutsForAmount>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::random_outs_by_amounts(&client, amounts, outs_count).await
            },
            callback,
        );
    }

    /// Blocks following the newest entry of `known_block_ids` on the node's chain.
    pub fn get_new_blocks<C>(&self, known_block_ids: Vec<Hash>, callback: C)
    where
        C: FnOnce(NodeResult<NewBlocks>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::new_blocks(&client, known_block_ids).await },
            callback,
        );
    }

    pub fn get_transaction_outs_global_indices<C>(&self, transaction_hash: Hash, callback: C)
    where
        C: FnOnce(NodeResult<Vec<u32>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::transaction_outs_global_indices(&client, transaction_hash).await
            },
            callback,
        );
    }

    /// Lightweight block sync: short entries after the known ids, full
    /// entries from `timestamp` on.
    pub fn query_blocks<C>(&self, known_block_ids: Vec<Hash>, timestamp: u64, callback: C)
    where
        C: FnOnce(NodeResult<QueriedBlocks>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::query_blocks_lite(&client, known_block_ids, timestamp).await
            },
            callback,
        );
    }

    /// Pool contents relative to the caller's known ids at `known_block_id`.
    pub fn get_pool_symmetric_difference<C>(
        &self,
        known_pool_tx_ids: Vec<Hash>,
        known_block_id: Hash,
        callback: C,
    ) where
        C: FnOnce(NodeResult<PoolSymmetricDifference>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::pool_symmetric_difference(&client, known_pool_tx_ids, known_block_id)
                    .await
            },
            callback,
        );
    }

    pub fn get_multisignature_output_by_global_index<C>(
        &self,
        amount: u64,
        gindex: u32,
        callback: C,
    ) where
        C: FnOnce(NodeResult<MultisignatureOutput>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::multisignature_output(&client, amount, gindex).await
            },
            callback,
        );
    }

    pub fn get_blocks_by_heights<C>(&self, block_heights: Vec<u32>, callback: C)
    where
        C: FnOnce(NodeResult<Vec<Vec<BlockDetails>>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::blocks_by_heights(&client, block_heights).await },
            callback,
        );
    }

    pub fn get_blocks_by_hashes<C>(&self, block_hashes: Vec<Hash>, callback: C)
    where
        C: FnOnce(NodeResult<Vec<BlockDetails>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::blocks_by_hashes(&client, block_hashes).await },
            callback,
        );
    }

    /// Blocks with timestamps in `[timestamp_begin, timestamp_end]`, at most
    /// `limit` of them. An inverted window yields an empty result.
    pub fn get_blocks_by_timestamps<C>(
        &self,
        timestamp_begin: u64,
        timestamp_end: u64,
        limit: u32,
        callback: C,
    ) where
        C: FnOnce(NodeResult<TimestampRange<BlockDetails>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::blocks_by_timestamps(&client, timestamp_begin, timestamp_end, limit)
                    .await
            },
            callback,
        );
    }

    pub fn get_block<C>(&self, block_height: u32, callback: C)
    where
        C: FnOnce(NodeResult<BlockDetails>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::block_by_height(&client, block_height).await },
            callback,
        );
    }

    pub fn get_transactions<C>(&self, transaction_hashes: Vec<Hash>, callback: C)
    where
        C: FnOnce(NodeResult<Vec<TransactionDetails>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::transactions(&client, transaction_hashes).await
            },
            callback,
        );
    }

    pub fn get_transactions_by_payment_id<C>(&self, payment_id: Hash, callback: C)
    where
        C: FnOnce(NodeResult<Vec<TransactionDetails>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::transactions_by_payment_id(&client, payment_id).await
            },
            callback,
        );
    }

    /// Pool transactions received in `[timestamp_begin, timestamp_end]`, at
    /// most `limit` of them. An inverted window yields an empty result.
    pub fn get_pool_transactions<C>(
        &self,
        timestamp_begin: u64,
        timestamp_end: u64,
        limit: u32,
        callback: C,
    ) where
        C: FnOnce(NodeResult<TimestampRange<TransactionDetails>>) + Send + 'static,
    {
        self.schedule(
            move |client| async move {
                operations::pool_transactions(&client, timestamp_begin, timestamp_end, limit)
                    .await
            },
            callback,
        );
    }

    pub fn is_synchronized<C>(&self, callback: C)
    where
        C: FnOnce(NodeResult<bool>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::is_synchronized(&client).await },
            callback,
        );
    }

    /// Current height straight from the node, bypassing the cache.
    pub fn get_height<C>(&self, callback: C)
    where
        C: FnOnce(NodeResult<u32>) + Send + 'static,
    {
        self.schedule(
            move |client| async move { operations::height(&client).await },
            callback,
        );
    }
}

impl Drop for NodeRpcProxy {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for NodeRpcProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRpcProxy")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .field("rpc_timeout", &self.rpc_timeout())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn operations_fail_fast_before_init() {
        let proxy = NodeRpcProxy::new("127.0.0.1", 9).unwrap();
        let (tx, rx) = mpsc::channel();

        proxy.get_height(move |result| tx.send(result).unwrap());
        // Delivered synchronously on this thread.
        assert_eq!(rx.try_recv().unwrap(), Err(NodeError::NotInitialized));
        assert_eq!(proxy.state(), ConnectionState::NotInitialized);
    }

    #[test]
    fn shutdown_without_init_is_a_no_op() {
        let proxy = NodeRpcProxy::new("127.0.0.1", 9).unwrap();
        assert!(!proxy.shutdown());
        assert!(!proxy.shutdown());
        assert_eq!(proxy.state(), ConnectionState::NotInitialized);
    }

    #[test]
    fn cached_getters_start_empty() {
        let proxy = NodeRpcProxy::new("127.0.0.1", 9).unwrap();
        assert_eq!(proxy.peer_count(), 0);
        assert_eq!(proxy.last_known_block_height(), 0);
        assert_eq!(proxy.local_block_count(), 1);
        assert_eq!(proxy.known_block_count(), 1);
        assert_eq!(proxy.minimal_fee(), 0);
        assert!(proxy.fee_address().is_empty());
        assert!(proxy.last_local_block_header_info().hash.is_zero());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(matches!(
            NodeRpcProxy::new("", 18333),
            Err(NodeError::InvalidArgument(_))
        ));
        assert!(matches!(
            NodeRpcProxy::new("127.0.0.1", 0),
            Err(NodeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rpc_timeout_is_adjustable() {
        let proxy = NodeRpcProxy::new("127.0.0.1", 9).unwrap();
        assert_eq!(proxy.rpc_timeout(), dynex_config::DEFAULT_RPC_TIMEOUT);
        proxy.set_rpc_timeout(Duration::from_millis(250));
        assert_eq!(proxy.rpc_timeout(), Duration::from_millis(250));
        proxy.set_rpc_timeout(Duration::ZERO);
        assert_eq!(proxy.rpc_timeout(), Duration::from_millis(1));
    }
}
