// Copyright (C) 2015-2025 The Neo Project.
//
// error.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error kinds delivered to completion callbacks.

use dynex_rpc_client::RpcError;
use thiserror::Error;

/// Failure reported by a proxy operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The proxy is not in the `Initialized` state.
    #[error("Node proxy is not initialized")]
    NotInitialized,

    /// `init` was called while the proxy was already initializing or initialized.
    #[error("Node proxy is already initialized")]
    AlreadyInitialized,

    /// The daemon could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A single round-trip exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The daemon answered with a body that does not match the expected structure.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The daemon served the request but refused it.
    #[error("Request rejected by node: {message}")]
    Rejected {
        code: Option<i64>,
        message: String,
    },

    /// The proxy was shut down before the operation completed.
    #[error("Operation interrupted by shutdown")]
    Interrupted,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation aborted abnormally inside the worker.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NodeError {
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::Rejected {
            code: None,
            message: message.into(),
        }
    }

    /// Transient failures are worth retrying at the caller's discretion.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout)
    }
}

impl From<RpcError> for NodeError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Serialization { message } => Self::MalformedResponse(message),
            RpcError::Connection { message } => Self::ConnectionFailed(message),
            RpcError::InvalidUrl { message } => Self::ConnectionFailed(message),
            RpcError::Timeout { .. } => Self::Timeout,
            RpcError::HttpStatus { status } => Self::Rejected {
                code: Some(i64::from(status)),
                message: format!("HTTP status {status}"),
            },
            RpcError::NodeStatus { status } => Self::Rejected {
                code: None,
                message: status,
            },
            RpcError::Application { code, message } => Self::Rejected {
                code: Some(code),
                message,
            },
        }
    }
}

/// Result delivered to every completion callback.
pub type NodeResult<T> = std::result::Result<T, NodeError>;
