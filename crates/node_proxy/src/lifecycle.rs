// Copyright (C) 2015-2025 The Neo Project.
//
// lifecycle.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Connection state machine and worker thread ownership.
//!
//! ```text
//! NotInitialized --init--> Initializing --first pull ok--> Initialized
//!       ^                       |                               |
//!       +------ pull failed ----+                               |
//!       +----------------------- shutdown ----------------------+
//! ```
//!
//! The state, the shutdown flag and the worker handle live under one mutex.
//! A condition variable lets a second `shutdown` wait for one in progress.

use crate::error::NodeError;
use crate::scheduler::{Job, JobSender};
use crate::types::ConnectionState;
use parking_lot::{Condvar, Mutex};
use std::thread::{self, JoinHandle, ThreadId};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Handles to a running (or finished) worker thread.
pub(crate) struct WorkerHandle {
    pub thread: JoinHandle<()>,
    pub stop: watch::Sender<bool>,
    pub jobs: JobSender,
}

impl WorkerHandle {
    fn is_current_thread(&self) -> bool {
        self.thread.thread().id() == thread::current().id()
    }

    /// Signals stop and waits for the thread, unless called from the worker itself.
    pub fn stop_and_join(self) {
        let _ = self.stop.send(true);
        if self.is_current_thread() {
            debug!("shutdown requested from the worker thread; not joining");
            return;
        }
        if self.thread.join().is_err() {
            warn!("node proxy worker thread panicked");
        }
    }
}

#[derive(Default)]
struct LifecycleInner {
    state: ConnectionState,
    stopping: bool,
    worker: Option<WorkerHandle>,
    worker_thread: Option<ThreadId>,
}

#[derive(Default)]
pub(crate) struct Lifecycle {
    inner: Mutex<LifecycleInner>,
    shutdown_done: Condvar,
}

impl Lifecycle {
    pub fn state(&self) -> ConnectionState {
        self.inner.lock().state
    }

    /// Takes the handle left behind by a failed init so it can be joined.
    pub fn take_stale_worker(&self) -> Option<WorkerHandle> {
        let mut inner = self.inner.lock();
        if inner.state == ConnectionState::NotInitialized && !inner.stopping {
            inner.worker_thread = None;
            inner.worker.take()
        } else {
            None
        }
    }

    /// Moves to `Initializing` and starts the worker through `spawn`.
    ///
    /// `spawn` runs under the lifecycle lock so no shutdown can slip between
    /// the transition and the worker becoming joinable.
    pub fn start<F>(&self, spawn: F) -> Result<(), NodeError>
    where
        F: FnOnce() -> Result<WorkerHandle, NodeError>,
    {
        let mut inner = self.inner.lock();
        if inner.stopping {
            return Err(NodeError::Interrupted);
        }
        if inner.state != ConnectionState::NotInitialized {
            return Err(NodeError::AlreadyInitialized);
        }
        if let Some(stale) = inner.worker.take() {
            // Finished by now or about to be; it only delivers its init callback.
            drop(stale);
        }

        let worker = spawn()?;
        inner.worker_thread = Some(worker.thread.thread().id());
        inner.worker = Some(worker);
        inner.state = ConnectionState::Initializing;
        Ok(())
    }

    /// Called by the worker once the first pull succeeded.
    ///
    /// Returns `false` when a shutdown got there first.
    pub fn mark_initialized(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.stopping || inner.state != ConnectionState::Initializing {
            return false;
        }
        inner.state = ConnectionState::Initialized;
        true
    }

    /// Called by the worker when the first pull failed. The worker handle
    /// stays behind and is joined by the next `init` or `shutdown`.
    pub fn mark_init_failed(&self) {
        let mut inner = self.inner.lock();
        if !inner.stopping && inner.state == ConnectionState::Initializing {
            inner.state = ConnectionState::NotInitialized;
        }
    }

    /// Sender for a request, or the error to deliver when none may be queued.
    pub fn job_sender(&self) -> Result<JobSender, NodeError> {
        let inner = self.inner.lock();
        if inner.stopping {
            return Err(NodeError::Interrupted);
        }
        match (inner.state, &inner.worker) {
            (ConnectionState::Initialized, Some(worker)) => Ok(worker.jobs.clone()),
            _ => Err(NodeError::NotInitialized),
        }
    }

    /// Queues `job` on the worker or rejects it on the caller's thread.
    pub fn dispatch(&self, job: Job) {
        match self.job_sender() {
            Ok(sender) => {
                if let Err(rejected) = sender.send(job) {
                    rejected.0.reject(NodeError::Interrupted);
                }
            }
            Err(err) => job.reject(err),
        }
    }

    /// Begins a shutdown and returns the worker to stop.
    ///
    /// Returns `None` when there is nothing to stop, or when called from the
    /// worker thread while another shutdown is already joining it.
    pub fn begin_shutdown(&self) -> Option<WorkerHandle> {
        let current = thread::current().id();
        let mut inner = self.inner.lock();
        while inner.stopping {
            if inner.worker_thread == Some(current) {
                return None;
            }
            self.shutdown_done.wait(&mut inner);
        }

        let worker = inner.worker.take()?;
        inner.stopping = true;
        Some(worker)
    }

    pub fn finish_shutdown(&self) {
        let mut inner = self.inner.lock();
        inner.state = ConnectionState::NotInitialized;
        inner.stopping = false;
        inner.worker_thread = None;
        self.shutdown_done.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::job_channel;

    fn idle_worker() -> WorkerHandle {
        let (stop, _) = watch::channel(false);
        let (jobs, _) = job_channel();
        WorkerHandle {
            thread: thread::spawn(|| {}),
            stop,
            jobs,
        }
    }

    #[test]
    fn init_then_shutdown_returns_to_not_initialized() {
        let lifecycle = Lifecycle::default();
        lifecycle.start(|| Ok(idle_worker())).unwrap();
        assert_eq!(lifecycle.state(), ConnectionState::Initializing);
        assert!(lifecycle.mark_initialized());
        assert_eq!(lifecycle.state(), ConnectionState::Initialized);

        let worker = lifecycle.begin_shutdown().expect("running worker");
        worker.stop_and_join();
        lifecycle.finish_shutdown();
        assert_eq!(lifecycle.state(), ConnectionState::NotInitialized);
        assert!(lifecycle.begin_shutdown().is_none());
    }

    #[test]
    fn second_init_is_rejected() {
        let lifecycle = Lifecycle::default();
        lifecycle.start(|| Ok(idle_worker())).unwrap();
        let err = lifecycle.start(|| Ok(idle_worker())).unwrap_err();
        assert_eq!(err, NodeError::AlreadyInitialized);
    }

    #[test]
    fn requests_need_initialized_state() {
        let lifecycle = Lifecycle::default();
        assert_eq!(lifecycle.job_sender().unwrap_err(), NodeError::NotInitialized);
        lifecycle.start(|| Ok(idle_worker())).unwrap();
        assert_eq!(lifecycle.job_sender().unwrap_err(), NodeError::NotInitialized);
        lifecycle.mark_initialized();
        assert!(lifecycle.job_sender().is_ok());
    }

    #[test]
    fn shutdown_wins_over_pending_initialization() {
        let lifecycle = Lifecycle::default();
        lifecycle.start(|| Ok(idle_worker())).unwrap();
        let worker = lifecycle.begin_shutdown().unwrap();
        assert!(!lifecycle.mark_initialized());
        assert_eq!(lifecycle.job_sender().unwrap_err(), NodeError::Interrupted);
        worker.stop_and_join();
        lifecycle.finish_shutdown();
        assert_eq!(lifecycle.state(), ConnectionState::NotInitialized);
    }

    #[test]
    fn failed_init_leaves_joinable_worker() {
        let lifecycle = Lifecycle::default();
        lifecycle.start(|| Ok(idle_worker())).unwrap();
        lifecycle.mark_init_failed();
        assert_eq!(lifecycle.state(), ConnectionState::NotInitialized);
        let stale = lifecycle.take_stale_worker().expect("stale worker");
        stale.stop_and_join();
        assert!(lifecycle.take_stale_worker().is_none());
    }

    #[test]
    fn spawn_failure_keeps_state() {
        let lifecycle = Lifecycle::default();
        let err = lifecycle
            .start(|| Err(NodeError::Internal("no threads".into())))
            .unwrap_err();
        assert!(matches!(err, NodeError::Internal(_)));
        assert_eq!(lifecycle.state(), ConnectionState::NotInitialized);
    }
}
