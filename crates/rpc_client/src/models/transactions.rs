// Copyright (C) 2015-2025 The Neo Project.
//
// transactions.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use dynex_core::{Hash, Transaction, TransactionDetails};
use serde::{Deserialize, Serialize};

/// `/sendrawtransaction` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendRawTransactionRequest {
    pub tx_as_hex: String,
}

impl SendRawTransactionRequest {
    pub fn new(transaction: &Transaction) -> Self {
        Self {
            tx_as_hex: transaction.to_hex(),
        }
    }
}

/// `/sendrawtransaction` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRawTransactionResponse {
    pub status: String,
}

/// `/get_transaction_details_by_hashes` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetTransactionDetailsByHashesRequest {
    pub transaction_hashes: Vec<Hash>,
}

/// `/get_transaction_details_by_hashes` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionDetailsByHashesResponse {
    pub status: String,
    #[serde(default)]
    pub transactions: Vec<TransactionDetails>,
}

/// `/get_transaction_hashes_by_payment_id` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetTransactionHashesByPaymentIdRequest {
    pub payment_id: Hash,
}

/// `/get_transaction_hashes_by_payment_id` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionHashesByPaymentIdResponse {
    pub status: String,
    #[serde(default)]
    pub transaction_hashes: Vec<Hash>,
}

/// `/get_o_indexes.bin` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetTxGlobalOutputIndexesRequest {
    pub txid: Hash,
}

/// `/get_o_indexes.bin` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTxGlobalOutputIndexesResponse {
    pub o_indexes: Vec<u32>,
    pub status: String,
}

/// `/get_pool_transactions_by_timestamps` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPoolTransactionsByTimestampsRequest {
    pub timestamp_begin: u64,
    pub timestamp_end: u64,
    pub limit: u64,
}

/// `/get_pool_transactions_by_timestamps` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPoolTransactionsByTimestampsResponse {
    pub status: String,
    #[serde(default)]
    pub transactions: Vec<TransactionDetails>,
    /// Number of pool transactions inside the window, regardless of `limit`.
    #[serde(default)]
    pub count: u64,
}
