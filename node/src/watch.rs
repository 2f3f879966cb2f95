// Copyright (C) 2015-2025 The Neo Project.
//
// watch.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use chrono::{DateTime, Utc};
use dynex_core::{BlockHeaderInfo, Hash};
use dynex_node_proxy::{ConnectivityObserver, NodeObserver};
use tracing::{info, warn};

/// Logs every proxy notification.
#[derive(Debug, Default)]
pub struct LoggingObserver;

pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

impl NodeObserver for LoggingObserver {
    fn peer_count_updated(&self, count: usize) {
        if count < 3 {
            warn!(peers = count, "low peer count on remote node");
        } else {
            info!(peers = count, "peer count updated");
        }
    }

    fn local_blockchain_updated(&self, height: u32) {
        info!(height, "node chain advanced");
    }

    fn last_known_block_height_updated(&self, height: u32) {
        info!(height, "network height updated");
    }

    fn block_header_updated(&self, header: &BlockHeaderInfo) {
        info!(
            height = header.index,
            hash = %header.hash,
            time = %format_timestamp(header.timestamp),
            difficulty = header.difficulty,
            "new top block"
        );
    }

    fn pool_changed(&self, added: &[Hash], removed: &[Hash]) {
        for id in added {
            info!(tx = %id, "transaction entered the pool");
        }
        info!(added = added.len(), removed = removed.len(), "pool changed");
    }
}

impl ConnectivityObserver for LoggingObserver {
    fn connection_status_updated(&self, connected: bool) {
        if connected {
            info!("connected to node");
        } else {
            warn!("lost connection to node");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_as_rfc3339() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
    }
}
