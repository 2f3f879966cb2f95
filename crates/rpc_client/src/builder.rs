// Copyright (C) 2015-2025 The Neo Project.
//
// builder.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{RpcError, RpcResult};
use crate::hooks::RpcClientHooks;
use crate::rpc_client::{NodeRpcClient, RequestTimeout, DEFAULT_HTTP_TIMEOUT};
use reqwest::{Client, Url};
use std::time::Duration;

/// Configurable builder for [`NodeRpcClient`].
#[derive(Debug)]
pub struct RpcClientBuilder {
    url: Url,
    timeout: Option<RequestTimeout>,
    hooks: RpcClientHooks,
    http_client: Option<Client>,
}

impl RpcClientBuilder {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: None,
            hooks: RpcClientHooks::default(),
            http_client: None,
        }
    }

    /// Per round-trip timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(RequestTimeout::new(timeout));
        self
    }

    /// Shares a timeout handle so the owner can retune it while the client is live.
    pub fn shared_timeout(mut self, timeout: RequestTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn hooks(mut self, hooks: RpcClientHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Reuses an existing HTTP client instead of building one.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> RpcResult<NodeRpcClient> {
        if self.url.cannot_be_a_base() {
            return Err(RpcError::InvalidUrl {
                message: self.url.to_string(),
            });
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|e| RpcError::connection(format!("HTTP client: {e}")))?,
        };

        Ok(NodeRpcClient::from_parts(
            self.url,
            http_client,
            self.timeout
                .unwrap_or_else(|| RequestTimeout::new(DEFAULT_HTTP_TIMEOUT)),
            self.hooks,
        ))
    }
}
