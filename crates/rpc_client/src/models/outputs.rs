// Copyright (C) 2015-2025 The Neo Project.
//
// outputs.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use dynex_core::{MultisignatureOutput, OutsForAmount};
use serde::{Deserialize, Serialize};

/// `/getrandom_outs.bin` request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetRandomOutsRequest {
    pub amounts: Vec<u64>,
    pub outs_count: u64,
}

/// `/getrandom_outs.bin` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetRandomOutsResponse {
    pub outs: Vec<OutsForAmount>,
    pub status: String,
}

/// `getmultisignatureoutput` JSON-RPC request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetMultisignatureOutputRequest {
    pub amount: u64,
    pub gindex: u32,
}

/// `getmultisignatureoutput` JSON-RPC result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMultisignatureOutputResponse {
    pub status: String,
    pub output: MultisignatureOutput,
}
