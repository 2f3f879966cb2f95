// Copyright (C) 2015-2025 The Neo Project.
//
// block.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::hash::Hash;
use crate::transaction::TransactionDetails;
use serde::{Deserialize, Serialize};

/// Summary of a block header as cached by the node access layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderInfo {
    /// Height of the block.
    pub index: u32,
    pub major_version: u8,
    pub minor_version: u8,
    pub timestamp: u64,
    pub prev_hash: Hash,
    pub nonce: u32,
    /// `true` when the block is on an alternative chain.
    pub is_alternative: bool,
    /// Distance from the tip.
    pub depth: u32,
    pub hash: Hash,
    pub difficulty: u64,
    pub reward: u64,
}

/// Explorer view of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDetails {
    pub major_version: u8,
    pub minor_version: u8,
    pub timestamp: u64,
    pub prev_block_hash: Hash,
    pub nonce: u32,
    #[serde(default)]
    pub is_orphaned: bool,
    pub height: u32,
    pub hash: Hash,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default)]
    pub reward: u64,
    #[serde(default)]
    pub base_reward: u64,
    #[serde(default)]
    pub block_size: u64,
    #[serde(default)]
    pub transactions_cumulative_size: u64,
    #[serde(default)]
    pub already_generated_coins: u64,
    #[serde(default)]
    pub already_generated_transactions: u64,
    #[serde(default)]
    pub size_median: u64,
    #[serde(default)]
    pub penalty: f64,
    #[serde(default)]
    pub total_fee_amount: u64,
    #[serde(default)]
    pub transactions: Vec<TransactionDetails>,
}

/// A full block with its transactions, both still serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCompleteEntry {
    pub block_hash: Hash,
    pub block: Vec<u8>,
    pub txs: Vec<Vec<u8>>,
}

/// Transaction prefix shipped by the lite block query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionShortInfo {
    pub tx_id: Hash,
    pub tx_prefix: Vec<u8>,
}

/// Compact block entry returned by the timestamp-window sync query.
///
/// Blocks older than the requested timestamp only carry their hash
/// (`has_block == false`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockShortEntry {
    pub block_hash: Hash,
    pub has_block: bool,
    pub block: Vec<u8>,
    pub tx_prefixes: Vec<TransactionShortInfo>,
}
