// Copyright (C) 2015-2025 The Neo Project.
//
// scheduler.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Request scheduling on the worker thread.
//!
//! Requests arrive over an unbounded channel and each one becomes a task on
//! the worker's single-threaded runtime. A task suspended on a round-trip
//! leaves the thread free for other requests and for the poller. Every
//! procedure races the stop signal, so shutdown unwinds it with
//! [`NodeError::Interrupted`].

use crate::error::{NodeError, NodeResult};
use dynex_rpc_client::NodeRpcClient;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Cooperative cancellation flag shared by every task on the worker.
#[derive(Debug, Clone)]
pub(crate) struct StopSignal(watch::Receiver<bool>);

impl StopSignal {
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self(rx))
    }

    /// Resolves once stop is requested or the sending side is gone.
    pub async fn wait(&self) {
        let mut rx = self.0.clone();
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

/// A queued unit of work paired with its completion callback.
pub(crate) trait Procedure: Send {
    /// Executes the procedure and delivers the outcome to the callback.
    fn run(self: Box<Self>, client: Arc<NodeRpcClient>, stop: StopSignal) -> BoxFuture<'static, ()>;

    /// Delivers `error` to the callback without running the procedure.
    fn reject(self: Box<Self>, error: NodeError);
}

pub(crate) type Job = Box<dyn Procedure>;
pub(crate) type JobSender = mpsc::UnboundedSender<Job>;
pub(crate) type JobReceiver = mpsc::UnboundedReceiver<Job>;

pub(crate) fn job_channel() -> (JobSender, JobReceiver) {
    mpsc::unbounded_channel()
}

pub(crate) struct Request<P, C, T> {
    procedure: P,
    callback: C,
    _output: PhantomData<fn() -> T>,
}

impl<P, Fut, C, T> Request<P, C, T>
where
    P: FnOnce(Arc<NodeRpcClient>) -> Fut + Send + 'static,
    Fut: Future<Output = NodeResult<T>> + Send + 'static,
    C: FnOnce(NodeResult<T>) + Send + 'static,
    T: Send + 'static,
{
    pub fn new(procedure: P, callback: C) -> Self {
        Self {
            procedure,
            callback,
            _output: PhantomData,
        }
    }
}

impl<P, Fut, C, T> Procedure for Request<P, C, T>
where
    P: FnOnce(Arc<NodeRpcClient>) -> Fut + Send + 'static,
    Fut: Future<Output = NodeResult<T>> + Send + 'static,
    C: FnOnce(NodeResult<T>) + Send + 'static,
    T: Send + 'static,
{
    fn run(self: Box<Self>, client: Arc<NodeRpcClient>, stop: StopSignal) -> BoxFuture<'static, ()> {
        let Request {
            procedure,
            callback,
            ..
        } = *self;

        async move {
            // The procedure is only called once polled, so a panic while
            // building its future is caught too.
            let work = AssertUnwindSafe(async move { procedure(client).await }).catch_unwind();
            let result = tokio::select! {
                biased;
                _ = stop.wait() => Err(NodeError::Interrupted),
                outcome = work => outcome.unwrap_or_else(|panic| {
                    let message = panic_message(panic.as_ref());
                    error!(%message, "request procedure panicked");
                    Err(NodeError::Internal(message))
                }),
            };
            deliver(callback, result);
        }
        .boxed()
    }

    fn reject(self: Box<Self>, error: NodeError) {
        deliver(self.callback, Err(error));
    }
}

/// Invokes a completion callback, containing any panic it raises.
pub(crate) fn deliver<T, C>(callback: C, result: NodeResult<T>)
where
    C: FnOnce(NodeResult<T>),
{
    if let Err(panic) = std::panic::catch_unwind(AssertUnwindSafe(move || callback(result))) {
        warn!(reason = %panic_message(panic.as_ref()), "completion callback panicked");
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "procedure panicked".to_string()
    }
}

/// Runs queued requests until stop is signalled, then drains the queue.
///
/// Requests still queued at stop are rejected with
/// [`NodeError::Interrupted`]; requests already running observe the stop
/// signal themselves and are awaited before returning.
pub(crate) async fn serve(mut jobs: JobReceiver, client: Arc<NodeRpcClient>, stop: StopSignal) {
    let mut running = JoinSet::new();

    loop {
        tokio::select! {
            _ = stop.wait() => break,
            job = jobs.recv() => match job {
                Some(job) => {
                    running.spawn(job.run(client.clone(), stop.clone()));
                }
                None => break,
            },
            Some(joined) = running.join_next(), if !running.is_empty() => {
                if let Err(err) = joined {
                    error!(error = %err, "request task aborted");
                }
            }
        }
    }

    jobs.close();
    let mut rejected = 0usize;
    while let Ok(job) = jobs.try_recv() {
        job.reject(NodeError::Interrupted);
        rejected += 1;
    }
    if rejected > 0 {
        debug!(rejected, "rejected queued requests at shutdown");
    }

    while let Some(joined) = running.join_next().await {
        if let Err(err) = joined {
            error!(error = %err, "request task aborted");
        }
    }
}
