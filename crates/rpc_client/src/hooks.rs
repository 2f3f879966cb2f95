// Copyright (C) 2015-2025 The Neo Project.
//
// hooks.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one RPC round-trip, handed to [`RpcClientHooks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequestOutcome {
    /// Endpoint path or JSON-RPC method.
    pub method: &'static str,
    /// Wire encoding used.
    pub format: &'static str,
    pub elapsed: Duration,
    pub success: bool,
    /// Timeout in force for the round-trip.
    pub timeout: Duration,
    pub error_code: Option<i64>,
}

type OutcomeCallback = dyn Fn(&RpcRequestOutcome) + Send + Sync;

/// Optional observers invoked after every round-trip.
#[derive(Clone, Default)]
pub struct RpcClientHooks {
    on_request: Option<Arc<OutcomeCallback>>,
}

impl RpcClientHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked with the outcome of every request.
    pub fn with_request_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RpcRequestOutcome) + Send + Sync + 'static,
    {
        self.on_request = Some(Arc::new(callback));
        self
    }

    pub(crate) fn notify(&self, outcome: RpcRequestOutcome) {
        if let Some(callback) = &self.on_request {
            callback(&outcome);
        }
    }
}

impl fmt::Debug for RpcClientHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClientHooks")
            .field("on_request", &self.on_request.is_some())
            .finish()
    }
}
