// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! A stub daemon serving the endpoints the poller depends on.

#![allow(dead_code)]

use dynex_config::{NodeEndpoint, ProxyConfig};
use dynex_core::{BlockDetails, Hash, Transaction};
use dynex_node_proxy::{
    ConnectivityObserver, NodeObserver, NodeResult, NodeRpcProxy,
};
use dynex_rpc_client::models::{
    BlockHeaderResponse, GetInfoResponse, GetLastBlockHeaderResponse, GetPoolChangesRequest,
    GetPoolChangesResponse, SendRawTransactionRequest,
};
use mockito::{Mock, Server, ServerGuard};
use serde_json::json;
use std::io::Write;
use std::net::TcpListener;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const WAIT: Duration = Duration::from_secs(10);

pub fn localhost_binding_permitted() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn block_hash(height: u32) -> Hash {
    Hash::digest(&height.to_le_bytes())
}

pub fn block_timestamp(height: u32) -> u64 {
    1_600_000_000 + u64::from(height) * 120
}

pub fn block_details(height: u32) -> BlockDetails {
    BlockDetails {
        major_version: 1,
        timestamp: block_timestamp(height),
        prev_block_hash: block_hash(height.saturating_sub(1)),
        height,
        hash: block_hash(height),
        difficulty: 1_000,
        ..Default::default()
    }
}

/// Chain and pool state the stub daemon answers from.
#[derive(Debug)]
pub struct MockNodeState {
    pub height: u32,
    pub peers: u64,
    pub min_fee: u64,
    pub synchronized: bool,
    pub pool: Vec<Transaction>,
    /// Status returned by `/sendrawtransaction`.
    pub relay_status: String,
    pub getinfo_calls: usize,
}

pub struct MockNode {
    pub server: ServerGuard,
    pub state: Arc<Mutex<MockNodeState>>,
    _mocks: Vec<Mock>,
}

impl MockNode {
    pub fn start(height: u32) -> Self {
        let mut server = Server::new();
        let state = Arc::new(Mutex::new(MockNodeState {
            height,
            peers: 8,
            min_fee: 100,
            synchronized: true,
            pool: Vec::new(),
            relay_status: "OK".to_string(),
            getinfo_calls: 0,
        }));

        let mut mocks = Vec::new();

        let node = state.clone();
        mocks.push(
            server
                .mock("POST", "/getinfo")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body_from_request(move |_| {
                    let mut node = node.lock().unwrap();
                    node.getinfo_calls += 1;
                    serde_json::to_vec(&GetInfoResponse {
                        status: "OK".to_string(),
                        height: node.height,
                        network_height: node.height,
                        incoming_connections_count: 0,
                        outgoing_connections_count: node.peers,
                        min_fee: node.min_fee,
                        synchronized: node.synchronized,
                        tx_pool_size: node.pool.len() as u64,
                        ..Default::default()
                    })
                    .unwrap()
                })
                .create(),
        );

        let node = state.clone();
        mocks.push(
            server
                .mock("POST", "/json_rpc")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body_from_request(move |request| {
                    let call: serde_json::Value =
                        serde_json::from_slice(request.body().unwrap()).unwrap();
                    let height = node.lock().unwrap().height;
                    let result = match call["method"].as_str() {
                        Some("getlastblockheader") => {
                            serde_json::to_value(GetLastBlockHeaderResponse {
                                status: "OK".to_string(),
                                block_header: BlockHeaderResponse {
                                    major_version: 1,
                                    minor_version: 0,
                                    timestamp: block_timestamp(height),
                                    prev_hash: block_hash(height.saturating_sub(1)),
                                    nonce: 0,
                                    orphan_status: false,
                                    height,
                                    depth: 0,
                                    hash: block_hash(height),
                                    difficulty: 1_000,
                                    reward: 50,
                                },
                            })
                            .unwrap()
                        }
                        Some("getblockdetailsbyheight") => {
                            let requested = call["params"]["block_height"].as_u64().unwrap() as u32;
                            if requested > height {
                                return json!({
                                    "jsonrpc": "2.0",
                                    "id": 1,
                                    "error": { "code": -2, "message": "Too big height" }
                                })
                                .to_string()
                                .into_bytes();
                            }
                            json!({ "status": "OK", "block": block_details(requested) })
                        }
                        _ => {
                            return json!({
                                "jsonrpc": "2.0",
                                "id": 1,
                                "error": { "code": -32601, "message": "Method not found" }
                            })
                            .to_string()
                            .into_bytes()
                        }
                    };
                    json!({ "jsonrpc": "2.0", "id": 1, "result": result })
                        .to_string()
                        .into_bytes()
                })
                .create(),
        );

        let node = state.clone();
        mocks.push(
            server
                .mock("POST", "/get_pool_changes_lite.bin")
                .with_status(200)
                .with_header("content-type", "application/octet-stream")
                .with_body_from_request(move |request| {
                    let request: GetPoolChangesRequest =
                        bincode::deserialize(request.body().unwrap()).unwrap();
                    let node = node.lock().unwrap();

                    let response = if request.tail_block_id != block_hash(node.height) {
                        GetPoolChangesResponse {
                            is_tail_block_actual: false,
                            status: "OK".to_string(),
                            ..Default::default()
                        }
                    } else {
                        let pool_ids: Vec<Hash> = node.pool.iter().map(Transaction::hash).collect();
                        GetPoolChangesResponse {
                            is_tail_block_actual: true,
                            added_txs: node
                                .pool
                                .iter()
                                .filter(|tx| !request.known_txs_ids.contains(&tx.hash()))
                                .cloned()
                                .collect(),
                            deleted_txs_ids: request
                                .known_txs_ids
                                .iter()
                                .filter(|id| !pool_ids.contains(id))
                                .copied()
                                .collect(),
                            status: "OK".to_string(),
                        }
                    };
                    bincode::serialize(&response).unwrap()
                })
                .create(),
        );

        let node = state.clone();
        mocks.push(
            server
                .mock("POST", "/sendrawtransaction")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body_from_request(move |request| {
                    let request: SendRawTransactionRequest =
                        serde_json::from_slice(request.body().unwrap()).unwrap();
                    let mut node = node.lock().unwrap();
                    let status = node.relay_status.clone();
                    if status == "OK" {
                        let blob = hex::decode(&request.tx_as_hex).unwrap();
                        node.pool.push(Transaction::from_bytes(blob));
                    }
                    json!({ "status": status }).to_string().into_bytes()
                })
                .create(),
        );

        Self {
            server,
            state,
            _mocks: mocks,
        }
    }

    pub fn endpoint(&self) -> NodeEndpoint {
        self.server.host_with_port().parse().unwrap()
    }

    pub fn proxy(&self) -> NodeRpcProxy {
        NodeRpcProxy::with_config(
            ProxyConfig::new(self.endpoint())
                .with_rpc_timeout(Duration::from_secs(2))
                .with_pull_interval(POLL_INTERVAL),
        )
        .unwrap()
    }

    pub fn set_height(&self, height: u32) {
        self.state.lock().unwrap().height = height;
    }

    /// Serves `body` on `path` only once the returned guard releases it.
    pub fn hold(&mut self, path: &str, body: &'static [u8]) -> HeldResponse {
        let gate = Gate::default();
        let waiting = gate.clone();
        let mock = self
            .server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(move |w| {
                waiting.wait();
                w.write_all(body)
            })
            .create();
        HeldResponse { gate, _mock: mock }
    }

    /// Confirms every pool transaction into a new block.
    pub fn mine_pool(&self) {
        let mut node = self.state.lock().unwrap();
        node.pool.clear();
        node.height += 1;
    }
}

#[derive(Clone, Default)]
struct Gate(Arc<(Mutex<bool>, Condvar)>);

impl Gate {
    fn open(&self) {
        let (open, changed) = &*self.0;
        *open.lock().unwrap() = true;
        changed.notify_all();
    }

    fn wait(&self) {
        let (open, changed) = &*self.0;
        let mut open = open.lock().unwrap();
        while !*open {
            open = changed.wait(open).unwrap();
        }
    }
}

/// A response the stub daemon withholds until [`HeldResponse::release`] or drop.
///
/// The stub joins a withheld body when its client disconnects, so it stays
/// unresponsive until the body is released.
pub struct HeldResponse {
    gate: Gate,
    _mock: Mock,
}

impl HeldResponse {
    pub fn release(&self) {
        self.gate.open();
    }
}

impl Drop for HeldResponse {
    fn drop(&mut self) {
        self.gate.open();
    }
}

/// Port nothing listens on.
pub fn unreachable_endpoint() -> NodeEndpoint {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    NodeEndpoint::new("127.0.0.1", port)
}

/// Runs an operation and waits for its single callback.
pub fn wait_for<T, F>(start: F) -> NodeResult<T>
where
    T: Send + 'static,
    F: FnOnce(Box<dyn FnOnce(NodeResult<T>) + Send>),
{
    let (tx, rx) = mpsc::channel();
    start(Box::new(move |result| {
        let _ = tx.send(result);
    }));
    let result = rx.recv_timeout(WAIT).expect("callback did not fire");
    assert!(
        rx.recv_timeout(Duration::from_millis(50)).is_err(),
        "callback fired twice"
    );
    result
}

pub fn init(proxy: &NodeRpcProxy) -> NodeResult<()> {
    wait_for(|done| proxy.init(done))
}

/// Polls `condition` until it holds or the wait budget runs out.
pub fn eventually<F: FnMut() -> bool>(mut condition: F) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    condition()
}

/// Observer recording every event it receives.
#[derive(Default)]
pub struct Recorder {
    pub events: Mutex<Vec<Event>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Peers(usize),
    LocalHeight(u32),
    KnownHeight(u32),
    Header(u32),
    Pool { added: Vec<Hash>, removed: Vec<Hash> },
    Connected(bool),
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn pool_additions(&self, id: &Hash) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Pool { added, .. } if added.contains(id)))
            .count()
    }

    pub fn connectivity(&self) -> Vec<bool> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                Event::Connected(connected) => Some(*connected),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl NodeObserver for Recorder {
    fn peer_count_updated(&self, count: usize) {
        self.push(Event::Peers(count));
    }

    fn local_blockchain_updated(&self, height: u32) {
        self.push(Event::LocalHeight(height));
    }

    fn last_known_block_height_updated(&self, height: u32) {
        self.push(Event::KnownHeight(height));
    }

    fn block_header_updated(&self, header: &dynex_core::BlockHeaderInfo) {
        self.push(Event::Header(header.index));
    }

    fn pool_changed(&self, added: &[Hash], removed: &[Hash]) {
        self.push(Event::Pool {
            added: added.to_vec(),
            removed: removed.to_vec(),
        });
    }
}

impl ConnectivityObserver for Recorder {
    fn connection_status_updated(&self, connected: bool) {
        self.push(Event::Connected(connected));
    }
}
