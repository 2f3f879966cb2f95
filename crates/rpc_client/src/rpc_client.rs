// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_client.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::builder::RpcClientBuilder;
use crate::command::{NodeStatus, RpcCommand, STATUS_OK};
use crate::error::{RpcError, RpcResult};
use crate::hooks::{RpcClientHooks, RpcRequestOutcome};
use crate::wire::WireFormat;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Timeout used when none is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared, adjustable per round-trip timeout.
///
/// Clones observe the same value, so a timeout changed by the owner applies to
/// the next round-trip of every client holding the handle.
#[derive(Debug, Clone)]
pub struct RequestTimeout(Arc<AtomicU64>);

impl RequestTimeout {
    pub fn new(timeout: Duration) -> Self {
        Self(Arc::new(AtomicU64::new(Self::millis(timeout))))
    }

    pub fn get(&self) -> Duration {
        Duration::from_millis(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, timeout: Duration) {
        self.0.store(Self::millis(timeout), Ordering::Relaxed);
    }

    /// Whole milliseconds, at least one.
    fn millis(timeout: Duration) -> u64 {
        u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1)
    }
}

impl Default for RequestTimeout {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_TIMEOUT)
    }
}

/// The RPC client used to talk to a single daemon.
///
/// Every [`RpcCommand`] goes through [`NodeRpcClient::call`], which encodes it
/// with the command's [`WireFormat`], enforces the timeout on the round-trip and
/// maps every failure onto [`RpcError`].
#[derive(Debug)]
pub struct NodeRpcClient {
    base_address: Url,
    http_client: Client,
    timeout: RequestTimeout,
    hooks: RpcClientHooks,
}

impl NodeRpcClient {
    /// Creates a configurable builder for the RPC client.
    #[must_use]
    pub fn builder(url: Url) -> RpcClientBuilder {
        RpcClientBuilder::new(url)
    }

    /// Creates a client with default settings.
    pub fn new(url: Url) -> RpcResult<Self> {
        RpcClientBuilder::new(url).build()
    }

    pub(crate) fn from_parts(
        base_address: Url,
        http_client: Client,
        timeout: RequestTimeout,
        hooks: RpcClientHooks,
    ) -> Self {
        Self {
            base_address,
            http_client,
            timeout,
            hooks,
        }
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.get()
    }

    pub fn set_timeout(&self, timeout: Duration) {
        self.timeout.set(timeout);
    }

    /// Issues one command and returns its typed response.
    pub async fn call<C: RpcCommand>(&self, request: &C) -> RpcResult<C::Response> {
        let timeout = self.timeout();
        let start = Instant::now();

        let result = match tokio::time::timeout(timeout, self.round_trip(request, timeout)).await
        {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout { timeout }),
        };

        let elapsed = start.elapsed();
        match &result {
            Ok(_) => trace!(method = C::ENDPOINT, ?elapsed, "rpc request completed"),
            Err(err) => debug!(method = C::ENDPOINT, ?elapsed, error = %err, "rpc request failed"),
        }
        self.hooks.notify(RpcRequestOutcome {
            method: C::ENDPOINT,
            format: <C::Format as WireFormat>::NAME,
            elapsed,
            success: result.is_ok(),
            timeout,
            error_code: result.as_ref().err().map(RpcError::code),
        });

        result
    }

    async fn round_trip<C: RpcCommand>(
        &self,
        request: &C,
        timeout: Duration,
    ) -> RpcResult<C::Response> {
        let body = C::Format::encode(C::ENDPOINT, request)?;
        let url = self
            .base_address
            .join(&C::Format::path(C::ENDPOINT))
            .map_err(|e| RpcError::InvalidUrl {
                message: format!("{}: {e}", C::ENDPOINT),
            })?;

        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, C::Format::CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| RpcError::from_transport(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| RpcError::from_transport(e, timeout))?;

        let decoded: C::Response = C::Format::decode(&content)?;
        if decoded.status() != STATUS_OK {
            return Err(RpcError::NodeStatus {
                status: decoded.status().to_string(),
            });
        }

        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GetInfoRequest, GetLastBlockHeaderRequest, GetPoolChangesRequest,
        GetPoolChangesResponse};
    use dynex_core::{Hash, Transaction};
    use mockito::{Matcher, Server};
    use std::net::TcpListener;
    use std::sync::Mutex;

    fn localhost_binding_permitted() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(server: &mockito::ServerGuard) -> NodeRpcClient {
        let url = Url::parse(&server.url()).expect("server url");
        NodeRpcClient::builder(url)
            .timeout(Duration::from_secs(2))
            .build()
            .expect("client")
    }

    #[tokio::test]
    async fn json_command_parses_response() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/getinfo")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"OK","height":100,"network_height":120,"incoming_connections_count":1,"outgoing_connections_count":2,"min_fee":1000,"synchronized":false}"#,
            )
            .create_async()
            .await;

        let info = client_for(&server).call(&GetInfoRequest::default()).await.unwrap();
        assert_eq!(info.height, 100);
        assert_eq!(info.network_height, 120);
        assert_eq!(info.peer_count(), 3);
        assert_eq!(info.min_fee, 1000);
    }

    #[tokio::test]
    async fn json_rpc_command_posts_method_to_dispatcher() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let hash = Hash::new([3u8; 32]);
        let body = format!(
            r#"{{"jsonrpc":"2.0","id":1,"result":{{"status":"OK","block_header":{{"major_version":1,"minor_version":0,"timestamp":1700000000,"prev_hash":"{prev}","nonce":7,"height":55,"hash":"{hash}","difficulty":99}}}}}}"#,
            prev = Hash::ZERO,
        );
        let _m = server
            .mock("POST", "/json_rpc")
            .match_body(Matcher::Regex(r#""method"\s*:\s*"getlastblockheader""#.to_string()))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let response = client_for(&server)
            .call(&GetLastBlockHeaderRequest::default())
            .await
            .unwrap();
        assert_eq!(response.block_header.height, 55);
        assert_eq!(response.block_header.hash, hash);
        assert_eq!(response.block_header.difficulty, 99);
    }

    #[tokio::test]
    async fn binary_command_round_trips_bincode() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let tx = Transaction::from_bytes(vec![1, 2, 3, 4]);
        let reply = GetPoolChangesResponse {
            is_tail_block_actual: true,
            added_txs: vec![tx.clone()],
            deleted_txs_ids: vec![Hash::new([8u8; 32])],
            status: STATUS_OK.to_string(),
        };
        let _m = server
            .mock("POST", "/get_pool_changes_lite.bin")
            .match_header("content-type", "application/octet-stream")
            .with_status(200)
            .with_body(bincode::serialize(&reply).unwrap())
            .create_async()
            .await;

        let response = client_for(&server)
            .call(&GetPoolChangesRequest::default())
            .await
            .unwrap();
        assert_eq!(response, reply);
        assert_eq!(response.added_txs[0].hash(), tx.hash());
    }

    #[tokio::test]
    async fn status_not_ok_is_reported() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/getinfo")
            .with_status(200)
            .with_body(r#"{"status":"BUSY","height":0}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .call(&GetInfoRequest::default())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RpcError::NodeStatus {
                status: "BUSY".to_string()
            }
        );
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/getinfo")
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server)
            .call(&GetInfoRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, RpcError::HttpStatus { status: 500 });
    }

    #[tokio::test]
    async fn silent_node_times_out() {
        if !localhost_binding_permitted() {
            return;
        }
        // Connections queue in the backlog and are never answered.
        let listener = TcpListener::bind("127.0.0.1:0").expect("listener");
        let url = Url::parse(&format!("http://{}", listener.local_addr().expect("addr")))
            .expect("url");
        let client = NodeRpcClient::builder(url)
            .timeout(Duration::from_secs(2))
            .build()
            .expect("client");

        client.set_timeout(Duration::from_millis(100));
        let err = client.call(&GetInfoRequest::default()).await.unwrap_err();
        assert_eq!(
            err,
            RpcError::Timeout {
                timeout: Duration::from_millis(100)
            }
        );
        assert!(err.is_transient());
        drop(listener);
    }

    #[test]
    fn request_timeout_is_at_least_one_millisecond() {
        let timeout = RequestTimeout::new(Duration::from_micros(10));
        assert_eq!(timeout.get(), Duration::from_millis(1));
        timeout.set(Duration::ZERO);
        assert_eq!(timeout.get(), Duration::from_millis(1));
        timeout.set(Duration::from_millis(1500));
        assert_eq!(timeout.get(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn unreachable_node_is_connection_error() {
        if !localhost_binding_permitted() {
            return;
        }
        // Grab a free port and release it so nothing listens there.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let client = NodeRpcClient::builder(url)
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let err = client.call(&GetInfoRequest::default()).await.unwrap_err();
        assert!(matches!(err, RpcError::Connection { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn hooks_observe_every_round_trip() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/getinfo")
            .with_status(200)
            .with_body(r#"{"status":"OK","height":1}"#)
            .create_async()
            .await;

        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        let hooks = RpcClientHooks::new().with_request_callback(move |outcome| {
            sink.lock().unwrap().push(outcome.clone());
        });
        let url = Url::parse(&server.url()).unwrap();
        let client = NodeRpcClient::builder(url).hooks(hooks).build().unwrap();

        client.call(&GetInfoRequest::default()).await.unwrap();

        let outcomes = outcomes.lock().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].method, "/getinfo");
        assert_eq!(outcomes[0].format, "json");
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].error_code, None);
    }
}
