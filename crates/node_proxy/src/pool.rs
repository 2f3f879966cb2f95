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

use dynex_core::Hash;
use std::collections::HashSet;

/// Effective change produced by applying a pool diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PoolUpdate {
    pub added: Vec<Hash>,
    pub removed: Vec<Hash>,
}

impl PoolUpdate {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Pool transaction ids already reported to observers.
///
/// Owned by the poller task, which is its only writer.
#[derive(Debug, Default)]
pub(crate) struct KnownTransactions {
    ids: HashSet<Hash>,
}

impl KnownTransactions {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Ids in the shape the pool-changes request expects.
    pub fn to_vec(&self) -> Vec<Hash> {
        self.ids.iter().copied().collect()
    }

    /// Applies a diff received from the node.
    ///
    /// Additions already known and removals never known are dropped from the
    /// returned update, so repeated or empty diffs change nothing.
    pub fn apply<A, R>(&mut self, added: A, removed: R) -> PoolUpdate
    where
        A: IntoIterator<Item = Hash>,
        R: IntoIterator<Item = Hash>,
    {
        let mut update = PoolUpdate::default();
        for id in removed {
            if self.ids.remove(&id) {
                update.removed.push(id);
            }
        }
        for id in added {
            if self.ids.insert(id) {
                update.added.push(id);
            }
        }
        update
    }
}
