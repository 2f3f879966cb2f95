// Copyright (C) 2015-2025 The Neo Project.
//
// types.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Outputs of the proxy operations.

use dynex_core::{BlockCompleteEntry, BlockShortEntry, Hash, Transaction};

/// Lifecycle state of a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    NotInitialized,
    Initializing,
    Initialized,
}

/// Blocks following the newest block id the caller already knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBlocks {
    pub blocks: Vec<BlockCompleteEntry>,
    /// Height of the first entry in `blocks`.
    pub start_height: u32,
}

/// Result of a lite block query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueriedBlocks {
    pub items: Vec<BlockShortEntry>,
    pub start_height: u32,
}

/// Node pool relative to a caller-supplied set of known transaction ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSymmetricDifference {
    /// `false` when the caller's known block id is no longer the node's tip.
    pub is_blockchain_actual: bool,
    pub added: Vec<Transaction>,
    pub deleted: Vec<Hash>,
}

/// Items found in a timestamp window, bounded by a limit.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampRange<T> {
    items: Vec<T>,
    count_within_range: u64,
}

impl<T> TimestampRange<T> {
    /// Builds a window result; the reported total never falls below `items.len()`.
    pub fn new(items: Vec<T>, count_within_range: u64) -> Self {
        let count_within_range = count_within_range.max(items.len() as u64);
        Self {
            items,
            count_within_range,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            count_within_range: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of matches in the window before the limit was applied.
    pub fn count_within_range(&self) -> u64 {
        self.count_within_range
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` when the limit cut the result short.
    pub fn is_truncated(&self) -> bool {
        self.count_within_range > self.items.len() as u64
    }
}

impl<T> Default for TimestampRange<T> {
    fn default() -> Self {
        Self::empty()
    }
}
