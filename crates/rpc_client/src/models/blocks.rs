// Copyright (C) 2015-2025 The Neo Project.
//
// blocks.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use dynex_core::{BlockCompleteEntry, BlockDetails, BlockShortEntry, Hash};
use serde::{Deserialize, Serialize};

/// `/getblocks.bin` request: the caller's sparse chain of known block ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlocksRequest {
    pub block_ids: Vec<Hash>,
}

/// `/getblocks.bin` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlocksResponse {
    pub blocks: Vec<BlockCompleteEntry>,
    pub start_height: u32,
    pub current_height: u32,
    pub status: String,
}

/// `/queryblockslite.bin` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryBlocksLiteRequest {
    pub block_ids: Vec<Hash>,
    pub timestamp: u64,
}

/// `/queryblockslite.bin` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBlocksLiteResponse {
    pub start_height: u32,
    pub current_height: u32,
    pub full_offset: u32,
    pub items: Vec<BlockShortEntry>,
    pub status: String,
}

/// `/get_blocks_details_by_heights` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlocksDetailsByHeightsRequest {
    pub block_heights: Vec<u32>,
}

/// `/get_blocks_details_by_hashes` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlocksDetailsByHashesRequest {
    pub block_hashes: Vec<Hash>,
}

/// Response shared by both block details endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetBlocksDetailsResponse {
    pub status: String,
    #[serde(default)]
    pub blocks: Vec<BlockDetails>,
}

/// `getblockdetailsbyheight` JSON-RPC request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlockDetailsByHeightRequest {
    pub block_height: u32,
}

/// `getblockdetailsbyheight` JSON-RPC result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetBlockDetailsByHeightResponse {
    pub status: String,
    pub block: BlockDetails,
}

/// `/get_blocks_hashes_by_timestamps` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetBlocksHashesByTimestampsRequest {
    pub timestamp_begin: u64,
    pub timestamp_end: u64,
    pub limit: u32,
}

/// `/get_blocks_hashes_by_timestamps` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlocksHashesByTimestampsResponse {
    pub status: String,
    #[serde(default)]
    pub block_hashes: Vec<Hash>,
    /// Number of blocks inside the window, regardless of `limit`.
    #[serde(default)]
    pub count: u32,
}
