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

//! Error types for RPC round-trips.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a single RPC round-trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The request could not be encoded or the response could not be decoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// The node could not be reached or the connection dropped mid-request.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The round-trip did not complete within the configured timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// Timeout that elapsed.
        timeout: Duration,
    },

    /// The HTTP layer answered with a non-success status.
    #[error("HTTP status {status}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The node answered with a `status` field other than `"OK"`.
    #[error("Node status: {status}")]
    NodeStatus {
        /// Reported status.
        status: String,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Application {
        /// JSON-RPC error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// The request URL could not be built.
    #[error("Invalid URL: {message}")]
    InvalidUrl {
        /// Error message.
        message: String,
    },
}

impl RpcError {
    /// Create a serialization error.
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an application error.
    pub fn application<S: Into<String>>(code: i64, message: S) -> Self {
        Self::Application {
            code,
            message: message.into(),
        }
    }

    /// Classifies a failure reported by the HTTP client.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout }
        } else if err.is_decode() {
            Self::serialization(err.to_string())
        } else {
            Self::connection(err.to_string())
        }
    }

    /// JSON-RPC style numeric code for logging and hooks.
    pub fn code(&self) -> i64 {
        match self {
            Self::Serialization { .. } => -32700,
            Self::Application { code, .. } => *code,
            Self::InvalidUrl { .. } => -32600,
            _ => -32603,
        }
    }

    /// `true` for failures that a retry may resolve.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }
}

/// Result type for RPC round-trips.
pub type RpcResult<T> = std::result::Result<T, RpcError>;
