// Copyright (C) 2015-2025 The Neo Project.
//
// command.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Binding of every typed request to its endpoint, encoding and response.

use crate::models::*;
use crate::wire::{Binary, Json, JsonRpc, WireFormat};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Status the daemon reports for a successfully served request.
pub const STATUS_OK: &str = "OK";

/// Application-level status carried inside a response body.
pub trait NodeStatus {
    fn status(&self) -> &str;
}

/// A request the daemon serves at a fixed endpoint with a fixed encoding.
pub trait RpcCommand: Serialize + Send + Sync {
    /// Encoding of both the request and the response.
    type Format: WireFormat;

    /// Typed response body.
    type Response: DeserializeOwned + NodeStatus + Send + 'static;

    /// HTTP path for [`Binary`] and [`Json`], method name for [`JsonRpc`].
    const ENDPOINT: &'static str;
}

macro_rules! rpc_commands {
    ($($request:ty => $response:ty, $format:ty, $endpoint:literal;)*) => {
        $(
            impl RpcCommand for $request {
                type Format = $format;
                type Response = $response;
                const ENDPOINT: &'static str = $endpoint;
            }

            impl NodeStatus for $response {
                fn status(&self) -> &str {
                    &self.status
                }
            }
        )*
    };
}

rpc_commands! {
    GetInfoRequest => GetInfoResponse, Json, "/getinfo";
    GetHeightRequest => GetHeightResponse, Json, "/getheight";
    GetFeeAddressRequest => GetFeeAddressResponse, Json, "/feeaddress";
    GetLastBlockHeaderRequest => GetLastBlockHeaderResponse, JsonRpc, "getlastblockheader";
    SendRawTransactionRequest => SendRawTransactionResponse, Json, "/sendrawtransaction";
    GetRandomOutsRequest => GetRandomOutsResponse, Binary, "/getrandom_outs.bin";
    GetBlocksRequest => GetBlocksResponse, Binary, "/getblocks.bin";
    GetTxGlobalOutputIndexesRequest => GetTxGlobalOutputIndexesResponse, Binary, "/get_o_indexes.bin";
    QueryBlocksLiteRequest => QueryBlocksLiteResponse, Binary, "/queryblockslite.bin";
    GetPoolChangesRequest => GetPoolChangesResponse, Binary, "/get_pool_changes_lite.bin";
    GetBlocksDetailsByHeightsRequest => GetBlocksDetailsResponse, Json, "/get_blocks_details_by_heights";
    GetBlockDetailsByHeightRequest => GetBlockDetailsByHeightResponse, JsonRpc, "getblockdetailsbyheight";
    GetBlocksHashesByTimestampsRequest => GetBlocksHashesByTimestampsResponse, Json, "/get_blocks_hashes_by_timestamps";
    GetTransactionDetailsByHashesRequest => GetTransactionDetailsByHashesResponse, Json, "/get_transaction_details_by_hashes";
    GetTransactionHashesByPaymentIdRequest => GetTransactionHashesByPaymentIdResponse, Json, "/get_transaction_hashes_by_payment_id";
    GetPoolTransactionsByTimestampsRequest => GetPoolTransactionsByTimestampsResponse, Json, "/get_pool_transactions_by_timestamps";
    GetMultisignatureOutputRequest => GetMultisignatureOutputResponse, JsonRpc, "getmultisignatureoutput";
}

// Shares its response type with the by-heights command, so it is bound by hand.
impl RpcCommand for GetBlocksDetailsByHashesRequest {
    type Format = Json;
    type Response = GetBlocksDetailsResponse;
    const ENDPOINT: &'static str = "/get_blocks_details_by_hashes";
}
