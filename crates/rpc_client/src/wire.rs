// Copyright (C) 2015-2025 The Neo Project.
//
// wire.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Wire encodings understood by the daemon.
//!
//! Every endpoint speaks exactly one of three encodings. [`WireFormat`] hides
//! the difference so the client issues every command through the same
//! round-trip path.

use crate::error::{RpcError, RpcResult};
use crate::models::{RpcRequest, RpcResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

/// Path of the daemon's JSON-RPC dispatcher.
pub const JSON_RPC_PATH: &str = "/json_rpc";

/// Request id sent with every JSON-RPC call.
const JSON_RPC_ID: u64 = 1;

/// Serialization strategy for one family of endpoints.
pub trait WireFormat: Send + Sync + 'static {
    /// Short name used in logs.
    const NAME: &'static str;

    /// `Content-Type` header sent with the request body.
    const CONTENT_TYPE: &'static str;

    /// HTTP path the request for `endpoint` is posted to.
    fn path(endpoint: &'static str) -> Cow<'static, str>;

    /// Serializes the request body.
    fn encode<T: Serialize>(endpoint: &str, request: &T) -> RpcResult<Vec<u8>>;

    /// Deserializes a response body into its typed structure.
    fn decode<T: DeserializeOwned>(body: &[u8]) -> RpcResult<T>;
}

/// `bincode` request/response pairs posted to `*.bin` paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binary;

impl WireFormat for Binary {
    const NAME: &'static str = "binary";
    const CONTENT_TYPE: &'static str = "application/octet-stream";

    fn path(endpoint: &'static str) -> Cow<'static, str> {
        Cow::Borrowed(endpoint)
    }

    fn encode<T: Serialize>(_endpoint: &str, request: &T) -> RpcResult<Vec<u8>> {
        bincode::serialize(request).map_err(|e| RpcError::serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> RpcResult<T> {
        bincode::deserialize(body).map_err(|e| RpcError::serialization(e.to_string()))
    }
}

/// Plain JSON documents posted to a per-command path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl WireFormat for Json {
    const NAME: &'static str = "json";
    const CONTENT_TYPE: &'static str = "application/json";

    fn path(endpoint: &'static str) -> Cow<'static, str> {
        Cow::Borrowed(endpoint)
    }

    fn encode<T: Serialize>(_endpoint: &str, request: &T) -> RpcResult<Vec<u8>> {
        serde_json::to_vec(request).map_err(|e| RpcError::serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> RpcResult<T> {
        serde_json::from_slice(body).map_err(|e| RpcError::serialization(e.to_string()))
    }
}

/// JSON-RPC 2.0 calls multiplexed over [`JSON_RPC_PATH`]; the endpoint is the method name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRpc;

impl WireFormat for JsonRpc {
    const NAME: &'static str = "json-rpc";
    const CONTENT_TYPE: &'static str = "application/json";

    fn path(_endpoint: &'static str) -> Cow<'static, str> {
        Cow::Borrowed(JSON_RPC_PATH)
    }

    fn encode<T: Serialize>(endpoint: &str, request: &T) -> RpcResult<Vec<u8>> {
        let envelope = RpcRequest::new(JSON_RPC_ID, endpoint, request);
        serde_json::to_vec(&envelope).map_err(|e| RpcError::serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(body: &[u8]) -> RpcResult<T> {
        let response: RpcResponse<T> = serde_json::from_slice(body)
            .map_err(|e| RpcError::serialization(format!("Invalid response: {e}")))?;

        if let Some(error) = response.error {
            return Err(RpcError::application(error.code, error.message));
        }

        response
            .result
            .ok_or_else(|| RpcError::serialization("No result returned"))
    }
}
