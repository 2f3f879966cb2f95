// Copyright (C) 2015-2025 The Neo Project.
//
// node_info.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use dynex_core::{BlockHeaderInfo, Hash};
use serde::{Deserialize, Serialize};

/// `/getinfo` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetInfoRequest {}

/// `/getinfo` response: the lightweight node status used by the poller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResponse {
    pub status: String,
    /// Top block index of the node's local chain.
    pub height: u32,
    /// Top block index the node knows the network has reached.
    #[serde(default)]
    pub network_height: u32,
    #[serde(default)]
    pub incoming_connections_count: u64,
    #[serde(default)]
    pub outgoing_connections_count: u64,
    #[serde(default)]
    pub min_fee: u64,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default)]
    pub tx_pool_size: u64,
    #[serde(default)]
    pub synchronized: bool,
    #[serde(default)]
    pub version: String,
}

impl GetInfoResponse {
    /// Incoming plus outgoing connections, saturating on overflow.
    pub fn peer_count(&self) -> usize {
        let total = self
            .incoming_connections_count
            .saturating_add(self.outgoing_connections_count);
        usize::try_from(total).unwrap_or(usize::MAX)
    }
}

/// `/getheight` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetHeightRequest {}

/// `/getheight` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHeightResponse {
    pub status: String,
    pub height: u32,
}

/// `/feeaddress` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetFeeAddressRequest {}

/// `/feeaddress` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFeeAddressResponse {
    pub status: String,
    #[serde(default)]
    pub fee_address: String,
}

/// `getlastblockheader` JSON-RPC request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetLastBlockHeaderRequest {}

/// Block header as serialized by the daemon's JSON-RPC interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderResponse {
    pub major_version: u8,
    pub minor_version: u8,
    pub timestamp: u64,
    pub prev_hash: Hash,
    pub nonce: u32,
    #[serde(default)]
    pub orphan_status: bool,
    pub height: u32,
    #[serde(default)]
    pub depth: u32,
    pub hash: Hash,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default)]
    pub reward: u64,
}

impl From<BlockHeaderResponse> for BlockHeaderInfo {
    fn from(header: BlockHeaderResponse) -> Self {
        BlockHeaderInfo {
            index: header.height,
            major_version: header.major_version,
            minor_version: header.minor_version,
            timestamp: header.timestamp,
            prev_hash: header.prev_hash,
            nonce: header.nonce,
            is_alternative: header.orphan_status,
            depth: header.depth,
            hash: header.hash,
            difficulty: header.difficulty,
            reward: header.reward,
        }
    }
}

/// `getlastblockheader` JSON-RPC result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetLastBlockHeaderResponse {
    pub status: String,
    pub block_header: BlockHeaderResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getinfo_counts_both_connection_directions() {
        let info: GetInfoResponse = serde_json::from_str(
            r#"{"status":"OK","height":10,"incoming_connections_count":2,"outgoing_connections_count":8}"#,
        )
        .unwrap();
        assert_eq!(info.peer_count(), 10);
        assert_eq!(info.network_height, 0);
        assert!(!info.synchronized);
    }

    #[test]
    fn oversized_connection_counts_saturate() {
        let info = GetInfoResponse {
            incoming_connections_count: u64::MAX,
            outgoing_connections_count: 3,
            ..Default::default()
        };
        assert_eq!(info.peer_count(), usize::MAX);
    }

    #[test]
    fn header_response_converts_to_header_info() {
        let header = BlockHeaderResponse {
            height: 42,
            orphan_status: true,
            hash: Hash::new([1u8; 32]),
            difficulty: 1000,
            ..Default::default()
        };
        let info = BlockHeaderInfo::from(header);
        assert_eq!(info.index, 42);
        assert!(info.is_alternative);
        assert_eq!(info.hash, Hash::new([1u8; 32]));
        assert_eq!(info.difficulty, 1000);
    }
}
