// Copyright (C) 2015-2025 The Neo Project.
//
// worker.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{NodeError, NodeResult};
use crate::lifecycle::WorkerHandle;
use crate::poller::NodeStatusPoller;
use crate::proxy::Shared;
use crate::scheduler::{self, deliver, job_channel, JobReceiver, StopSignal};
use dynex_rpc_client::{NodeRpcClient, RequestTimeout, Url};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

type InitCallback = Box<dyn FnOnce(NodeResult<()>) + Send>;

/// One-shot delivery of the `init` outcome.
#[derive(Clone)]
pub(crate) struct InitCompletion(Arc<Mutex<Option<InitCallback>>>);

impl InitCompletion {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(NodeResult<()>) + Send + 'static,
    {
        Self(Arc::new(Mutex::new(Some(Box::new(callback)))))
    }

    /// Delivers `result` unless an outcome was already delivered.
    pub fn complete(&self, result: NodeResult<()>) {
        let callback = self.0.lock().take();
        if let Some(callback) = callback {
            deliver(callback, result);
        }
    }
}

/// Everything the worker thread needs for one init session.
pub(crate) struct WorkerContext {
    pub shared: Arc<Shared>,
    pub base_url: Url,
    pub timeout: RequestTimeout,
    pub pull_interval: Duration,
}

impl WorkerContext {
    /// Spawns the worker thread and returns its handle.
    pub fn spawn(self, completion: InitCompletion) -> NodeResult<WorkerHandle> {
        let (stop_tx, stop) = StopSignal::channel();
        let (jobs_tx, jobs_rx) = job_channel();

        let thread = thread::Builder::new()
            .name("dynex-node-proxy".to_string())
            .spawn(move || self.run(jobs_rx, stop, completion))
            .map_err(|e| NodeError::Internal(format!("failed to spawn worker thread: {e}")))?;

        Ok(WorkerHandle {
            thread,
            stop: stop_tx,
            jobs: jobs_tx,
        })
    }

    fn run(self, jobs: JobReceiver, stop: StopSignal, completion: InitCompletion) {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!(error = %err, "failed to build worker runtime");
                self.shared.lifecycle.mark_init_failed();
                completion.complete(Err(NodeError::Internal(err.to_string())));
                return;
            }
        };

        runtime.block_on(self.serve(jobs, stop, completion));
    }

    async fn serve(self, jobs: JobReceiver, stop: StopSignal, completion: InitCompletion) {
        let WorkerContext {
            shared,
            base_url,
            timeout,
            pull_interval,
        } = self;

        // Built per session so no connection pool outlives its runtime.
        let client = match NodeRpcClient::builder(base_url)
            .shared_timeout(timeout)
            .build()
        {
            Ok(client) => Arc::new(client),
            Err(err) => {
                shared.lifecycle.mark_init_failed();
                completion.complete(Err(err.into()));
                return;
            }
        };

        let mut poller = NodeStatusPoller::new(shared.clone(), client.clone(), stop.clone());
        let first_pull = tokio::select! {
            biased;
            _ = stop.wait() => Err(NodeError::Interrupted),
            outcome = poller.pull() => outcome,
        };

        if let Err(err) = first_pull {
            warn!(error = %err, "node proxy initialization failed");
            poller.finish();
            shared.snapshot.reset();
            shared.lifecycle.mark_init_failed();
            completion.complete(Err(err));
            return;
        }
        if !shared.lifecycle.mark_initialized() {
            poller.finish();
            completion.complete(Err(NodeError::Interrupted));
            return;
        }

        info!(
            height = shared.snapshot.node_height(),
            peers = shared.snapshot.peer_count(),
            "node proxy initialized"
        );
        completion.complete(Ok(()));

        let polling = tokio::spawn(poller.run(pull_interval));
        scheduler::serve(jobs, client, stop).await;
        if let Err(err) = polling.await {
            error!(error = %err, "node status poller aborted");
        }
    }
}
