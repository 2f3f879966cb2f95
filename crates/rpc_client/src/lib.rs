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

//! Dynex daemon RPC client
//!
//! Typed requests and responses for every daemon endpoint the node proxy
//! uses, together with the three transport adapters the daemon speaks:
//! `bincode` documents on `*.bin` paths, plain JSON on per-command paths and
//! JSON-RPC 2.0 on `/json_rpc`. Each request type implements [`RpcCommand`],
//! so [`NodeRpcClient::call`] is the single round-trip entry point.

mod builder;
mod command;
mod error;
mod hooks;
pub mod models;
mod rpc_client;
pub mod wire;

pub use builder::RpcClientBuilder;
pub use command::{NodeStatus, RpcCommand, STATUS_OK};
pub use error::{RpcError, RpcResult};
pub use hooks::{RpcClientHooks, RpcRequestOutcome};
pub use rpc_client::{NodeRpcClient, RequestTimeout, DEFAULT_HTTP_TIMEOUT};

pub use reqwest::Url;
