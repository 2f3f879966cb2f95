// Copyright (C) 2015-2025 The Neo Project.
//
// transaction.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::hash::{Hash, PublicKey};
use serde::{Deserialize, Serialize};

/// A serialized transaction as relayed to and received from the node.
///
/// The access layer never interprets the blob; it only identifies it by the
/// fast hash of its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(Vec<u8>);

impl Transaction {
    /// Wraps a serialized transaction.
    pub fn from_bytes(blob: impl Into<Vec<u8>>) -> Self {
        Self(blob.into())
    }

    /// The serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The transaction identifier.
    pub fn hash(&self) -> Hash {
        Hash::digest(&self.0)
    }

    /// Hex form used by the `sendrawtransaction` endpoint.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// A transaction input as reported by the node's explorer endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionInputDetails {
    /// Coinbase input.
    Base {
        /// Height the coinbase belongs to.
        height: u32,
    },
    /// Key image spending a previous output.
    Key {
        /// Spent amount.
        amount: u64,
        /// Key image of the spent output.
        key_image: PublicKey,
        /// Ring size used for the input.
        mixin: u64,
    },
    /// Multisignature output redemption.
    Multisignature {
        /// Spent amount.
        amount: u64,
        /// Global index of the redeemed output.
        output_index: u32,
        /// Number of signatures supplied.
        signatures: u32,
    },
}

/// A transaction output as reported by the node's explorer endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutputDetails {
    /// Output amount.
    pub amount: u64,
    /// Position of the output among all outputs of the same amount.
    pub global_index: u32,
    /// Destination key.
    pub key: PublicKey,
}

/// Explorer view of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub hash: Hash,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub total_inputs_amount: u64,
    #[serde(default)]
    pub total_outputs_amount: u64,
    #[serde(default)]
    pub mixin: u64,
    #[serde(default)]
    pub unlock_time: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub payment_id: Hash,
    #[serde(default)]
    pub has_payment_id: bool,
    #[serde(default)]
    pub in_blockchain: bool,
    #[serde(default)]
    pub block_hash: Hash,
    #[serde(default)]
    pub block_height: u32,
    #[serde(default)]
    pub inputs: Vec<TransactionInputDetails>,
    #[serde(default)]
    pub outputs: Vec<TransactionOutputDetails>,
}
