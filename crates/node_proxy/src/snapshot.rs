// Copyright (C) 2015-2025 The Neo Project.
//
// snapshot.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use dynex_core::BlockHeaderInfo;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// Cached view of the remote chain, written by the poller and read from any thread.
///
/// Heights only move forward until [`ChainSnapshot::reset`].
#[derive(Debug, Default)]
pub(crate) struct ChainSnapshot {
    peer_count: AtomicUsize,
    node_height: AtomicU32,
    network_height: AtomicU32,
    minimal_fee: AtomicU64,
    last_local_header: RwLock<BlockHeaderInfo>,
}

impl ChainSnapshot {
    pub fn peer_count(&self) -> usize {
        self.peer_count.load(Ordering::Acquire)
    }

    /// Stores the peer count and returns `true` when it changed.
    pub fn set_peer_count(&self, count: usize) -> bool {
        self.peer_count.swap(count, Ordering::AcqRel) != count
    }

    pub fn node_height(&self) -> u32 {
        self.node_height.load(Ordering::Acquire)
    }

    /// Raises the node height; returns `true` when it advanced.
    pub fn advance_node_height(&self, height: u32) -> bool {
        self.node_height.fetch_max(height, Ordering::AcqRel) < height
    }

    pub fn network_height(&self) -> u32 {
        self.network_height.load(Ordering::Acquire)
    }

    /// Raises the network height; returns `true` when it advanced.
    pub fn advance_network_height(&self, height: u32) -> bool {
        self.network_height.fetch_max(height, Ordering::AcqRel) < height
    }

    pub fn minimal_fee(&self) -> u64 {
        self.minimal_fee.load(Ordering::Acquire)
    }

    pub fn set_minimal_fee(&self, fee: u64) {
        self.minimal_fee.store(fee, Ordering::Release);
    }

    pub fn last_local_header(&self) -> BlockHeaderInfo {
        self.last_local_header.read().clone()
    }

    /// Replaces the cached header and returns the previous one.
    pub fn replace_last_local_header(&self, header: BlockHeaderInfo) -> BlockHeaderInfo {
        std::mem::replace(&mut *self.last_local_header.write(), header)
    }

    pub fn last_local_height(&self) -> u32 {
        self.last_local_header.read().index
    }

    pub fn last_local_timestamp(&self) -> u64 {
        self.last_local_header.read().timestamp
    }

    pub fn reset(&self) {
        self.peer_count.store(0, Ordering::Release);
        self.node_height.store(0, Ordering::Release);
        self.network_height.store(0, Ordering::Release);
        self.minimal_fee.store(0, Ordering::Release);
        *self.last_local_header.write() = BlockHeaderInfo::default();
    }
}
