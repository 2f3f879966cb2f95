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

//! # dynex-rs: client-side access to a Dynex node
//!
//! Wallets and services use this library to treat a remote Dynex daemon as
//! a local, continuously refreshed view of the chain and the transaction pool.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dynex_rs::prelude::*;
//! use std::sync::mpsc;
//!
//! let proxy = NodeRpcProxy::new("127.0.0.1", 18333)?;
//! let (tx, rx) = mpsc::channel();
//! proxy.init(move |result| {
//!     let _ = tx.send(result);
//! });
//! rx.recv()??;
//!
//! println!("node height: {}", proxy.last_local_block_height());
//! proxy.shutdown();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several crates:
//!
//! - [`dynex_core`] - Hashes, transactions and block descriptions
//! - [`dynex_config`] - Endpoint and proxy configuration
//! - [`dynex_rpc_client`] - Typed HTTP client for the daemon's RPC surface
//! - [`dynex_node_proxy`] - Background worker, status poller and callback API

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use dynex_config as config;
pub use dynex_core as core;
pub use dynex_node_proxy as node_proxy;
pub use dynex_rpc_client as rpc_client;

/// Common imports for node access
pub mod prelude {
    pub use crate::config::{NodeEndpoint, ProxyConfig};
    pub use crate::core::{BlockDetails, BlockHeaderInfo, Hash, Transaction, TransactionDetails};
    pub use crate::node_proxy::{
        ConnectionState, ConnectivityObserver, NodeError, NodeObserver, NodeResult, NodeRpcProxy,
    };
    pub use crate::rpc_client::NodeRpcClient;
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
