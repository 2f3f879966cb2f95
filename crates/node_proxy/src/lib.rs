// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Dynex node RPC proxy
//!
//! [`NodeRpcProxy`] lets a wallet or service treat a remote daemon as a local
//! chain view without blocking on network I/O.
//!
//! ## Architecture
//!
//! - **Worker**: one thread per proxy runs a single-threaded tokio runtime.
//!   Caller requests and the status poller are tasks on it, interleaved in
//!   schedule order.
//! - **Lifecycle**: `NotInitialized -> Initializing -> Initialized`, driven by
//!   [`NodeRpcProxy::init`] and [`NodeRpcProxy::shutdown`].
//! - **Poller**: refreshes height, peers, fee, the top block header and the
//!   pool diff on a fixed interval; failures are logged and retried.
//! - **Observers**: [`NodeObserver`] and [`ConnectivityObserver`] listeners are
//!   held weakly and notified on the worker thread.
//!
//! ## Example
//!
//! ```no_run
//! use dynex_node_proxy::NodeRpcProxy;
//!
//! let proxy = NodeRpcProxy::new("127.0.0.1", 18333).unwrap();
//! proxy.init(|result| println!("init finished: {result:?}"));
//! ```

mod error;
mod lifecycle;
mod observer;
mod operations;
mod poller;
mod pool;
mod proxy;
mod scheduler;
mod snapshot;
mod types;
mod worker;

pub use error::{NodeError, NodeResult};
pub use observer::{ConnectivityObserver, NodeObserver, ObserverManager};
pub use proxy::NodeRpcProxy;
pub use types::{
    ConnectionState, NewBlocks, PoolSymmetricDifference, QueriedBlocks, TimestampRange,
};
