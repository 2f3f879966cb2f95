// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_request.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest<P> {
    /// Request ID
    pub id: u64,

    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub json_rpc: String,

    /// Method name
    pub method: String,

    /// Method parameters
    pub params: P,
}

impl<P> RpcRequest<P> {
    /// Creates a new RPC request
    pub fn new(id: u64, method: impl Into<String>, params: P) -> Self {
        Self {
            id,
            json_rpc: "2.0".to_string(),
            method: method.into(),
            params,
        }
    }
}

/// Error object carried by a failed JSON-RPC response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcResponseError {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse<R> {
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    #[serde(rename = "jsonrpc", default)]
    pub json_rpc: Option<String>,

    #[serde(default = "Option::default")]
    pub result: Option<R>,

    #[serde(default)]
    pub error: Option<RpcResponseError>,
}
