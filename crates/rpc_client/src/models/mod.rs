// Copyright (C) 2015-2025 The Neo Project.
//
// models/mod.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Typed request and response structures for every daemon endpoint.

mod blocks;
mod node_info;
mod outputs;
mod pool;
mod rpc_request;
mod transactions;

pub use blocks::*;
pub use node_info::*;
pub use outputs::*;
pub use pool::*;
pub use rpc_request::{RpcRequest, RpcResponse, RpcResponseError};
pub use transactions::*;
