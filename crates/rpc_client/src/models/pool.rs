// Copyright (C) 2015-2025 The Neo Project.
//
// pool.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use dynex_core::{Hash, Transaction};
use serde::{Deserialize, Serialize};

/// `/get_pool_changes_lite.bin` request: the caller's view of the pool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPoolChangesRequest {
    /// Tip the caller's view was built against.
    pub tail_block_id: Hash,
    pub known_txs_ids: Vec<Hash>,
}

/// `/get_pool_changes_lite.bin` response: symmetric difference against the node's pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPoolChangesResponse {
    /// `false` when `tail_block_id` is no longer the node's tip.
    pub is_tail_block_actual: bool,
    pub added_txs: Vec<Transaction>,
    pub deleted_txs_ids: Vec<Hash>,
    pub status: String,
}
