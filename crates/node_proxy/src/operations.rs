// Copyright (C) 2015-2025 The Neo Project.
//
// operations.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Procedures executed on the worker for each public operation.
//!
//! Each function performs one or more round-trips; the client enforces the
//! timeout on every one of them.

use crate::error::{NodeError, NodeResult};
use crate::types::{NewBlocks, PoolSymmetricDifference, QueriedBlocks, TimestampRange};
use dynex_core::{
    BlockDetails, Hash, MultisignatureOutput, OutsForAmount, Transaction, TransactionDetails,
};
use dynex_rpc_client::models::*;
use dynex_rpc_client::NodeRpcClient;
use tracing::debug;

pub(crate) async fn relay_transaction(
    client: &NodeRpcClient,
    transaction: Transaction,
) -> NodeResult<()> {
    if transaction.is_empty() {
        return Err(NodeError::InvalidArgument("empty transaction blob".into()));
    }
    client
        .call(&SendRawTransactionRequest::new(&transaction))
        .await?;
    debug!(hash = %transaction.hash(), "transaction relayed");
    Ok(())
}

pub(crate) async fn random_outs_by_amounts(
    client: &NodeRpcClient,
    amounts: Vec<u64>,
    outs_count: u64,
) -> NodeResult<Vec<OutsForAmount>> {
    let response = client
        .call(&GetRandomOutsRequest {
            amounts,
            outs_count,
        })
        .await?;
    Ok(response.outs)
}

pub(crate) async fn new_blocks(
    client: &NodeRpcClient,
    known_block_ids: Vec<Hash>,
) -> NodeResult<NewBlocks> {
    let response = client
        .call(&GetBlocksRequest {
            block_ids: known_block_ids,
        })
        .await?;
    Ok(NewBlocks {
        blocks: response.blocks,
        start_height: response.start_height,
    })
}

pub(crate) async fn transaction_outs_global_indices(
    client: &NodeRpcClient,
    transaction_hash: Hash,
) -> NodeResult<Vec<u32>> {
    let response = client
        .call(&GetTxGlobalOutputIndexesRequest {
            txid: transaction_hash,
        })
        .await?;
    Ok(response.o_indexes)
}

pub(crate) async fn query_blocks_lite(
    client: &NodeRpcClient,
    known_block_ids: Vec<Hash>,
    timestamp: u64,
) -> NodeResult<QueriedBlocks> {
    let response = client
        .call(&QueryBlocksLiteRequest {
            block_ids: known_block_ids,
            timestamp,
        })
        .await?;
    Ok(QueriedBlocks {
        items: response.items,
        start_height: response.start_height,
    })
}

pub(crate) async fn pool_symmetric_difference(
    client: &NodeRpcClient,
    known_pool_tx_ids: Vec<Hash>,
    known_block_id: Hash,
) -> NodeResult<PoolSymmetricDifference> {
    let response = client
        .call(&GetPoolChangesRequest {
            tail_block_id: known_block_id,
            known_txs_ids: known_pool_tx_ids,
        })
        .await?;
    Ok(PoolSymmetricDifference {
        is_blockchain_actual: response.is_tail_block_actual,
        added: response.added_txs,
        deleted: response.deleted_txs_ids,
    })
}

pub(crate) async fn multisignature_output(
    client: &NodeRpcClient,
    amount: u64,
    gindex: u32,
) -> NodeResult<MultisignatureOutput> {
    let response = client
        .call(&GetMultisignatureOutputRequest { amount, gindex })
        .await?;
    Ok(response.output)
}

/// One inner list per requested height, in request order.
pub(crate) async fn blocks_by_heights(
    client: &NodeRpcClient,
    block_heights: Vec<u32>,
) -> NodeResult<Vec<Vec<BlockDetails>>> {
    let response = client
        .call(&GetBlocksDetailsByHeightsRequest { block_heights })
        .await?;
    Ok(response.blocks.into_iter().map(|block| vec![block]).collect())
}

pub(crate) async fn blocks_by_hashes(
    client: &NodeRpcClient,
    block_hashes: Vec<Hash>,
) -> NodeResult<Vec<BlockDetails>> {
    let response = client
        .call(&GetBlocksDetailsByHashesRequest { block_hashes })
        .await?;
    Ok(response.blocks)
}

pub(crate) async fn block_by_height(
    client: &NodeRpcClient,
    block_height: u32,
) -> NodeResult<BlockDetails> {
    let response = client
        .call(&GetBlockDetailsByHeightRequest { block_height })
        .await?;
    Ok(response.block)
}

/// Blocks in `[begin, end]`: hashes first, then their details.
pub(crate) async fn blocks_by_timestamps(
    client: &NodeRpcClient,
    timestamp_begin: u64,
    timestamp_end: u64,
    limit: u32,
) -> NodeResult<TimestampRange<BlockDetails>> {
    if timestamp_begin > timestamp_end {
        return Ok(TimestampRange::empty());
    }

    let hashes = client
        .call(&GetBlocksHashesByTimestampsRequest {
            timestamp_begin,
            timestamp_end,
            limit,
        })
        .await?;
    let count = u64::from(hashes.count);
    if hashes.block_hashes.is_empty() {
        return Ok(TimestampRange::new(Vec::new(), count));
    }

    let mut blocks = client
        .call(&GetBlocksDetailsByHashesRequest {
            block_hashes: hashes.block_hashes,
        })
        .await?
        .blocks;
    blocks.truncate(limit as usize);
    Ok(TimestampRange::new(blocks, count))
}

pub(crate) async fn transactions(
    client: &NodeRpcClient,
    transaction_hashes: Vec<Hash>,
) -> NodeResult<Vec<TransactionDetails>> {
    let response = client
        .call(&GetTransactionDetailsByHashesRequest { transaction_hashes })
        .await?;
    Ok(response.transactions)
}

/// Transactions carrying `payment_id`: hashes first, then their details.
pub(crate) async fn transactions_by_payment_id(
    client: &NodeRpcClient,
    payment_id: Hash,
) -> NodeResult<Vec<TransactionDetails>> {
    let hashes = client
        .call(&GetTransactionHashesByPaymentIdRequest { payment_id })
        .await?
        .transaction_hashes;
    if hashes.is_empty() {
        return Ok(Vec::new());
    }
    transactions(client, hashes).await
}

pub(crate) async fn pool_transactions(
    client: &NodeRpcClient,
    timestamp_begin: u64,
    timestamp_end: u64,
    limit: u32,
) -> NodeResult<TimestampRange<TransactionDetails>> {
    if timestamp_begin > timestamp_end {
        return Ok(TimestampRange::empty());
    }

    let response = client
        .call(&GetPoolTransactionsByTimestampsRequest {
            timestamp_begin,
            timestamp_end,
            limit: u64::from(limit),
        })
        .await?;
    let mut transactions = response.transactions;
    transactions.truncate(limit as usize);
    Ok(TimestampRange::new(transactions, response.count))
}

pub(crate) async fn is_synchronized(client: &NodeRpcClient) -> NodeResult<bool> {
    let info = client.call(&GetInfoRequest::default()).await?;
    Ok(info.synchronized)
}

pub(crate) async fn height(client: &NodeRpcClient) -> NodeResult<u32> {
    let response = client.call(&GetHeightRequest::default()).await?;
    Ok(response.height)
}

pub(crate) async fn fee_address(client: &NodeRpcClient) -> NodeResult<String> {
    let response = client.call(&GetFeeAddressRequest::default()).await?;
    Ok(response.fee_address)
}
