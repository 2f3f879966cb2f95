// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Dynex Configuration Module
//!
//! This module provides configuration types for talking to a remote Dynex node.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default daemon RPC port
pub const DEFAULT_RPC_PORT: u16 = 18333;
/// Default daemon host
pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";

/// Per round-trip timeout applied to every wire operation
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Delay between two node status pulls
pub const DEFAULT_PULL_INTERVAL: Duration = Duration::from_millis(5_000);

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid endpoint '{0}': expected host:port")]
    InvalidEndpoint(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Host and port of the remote daemon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeEndpoint {
    pub host: String,
    pub port: u16,
}

impl NodeEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Base URL every RPC path is resolved against.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&format!("http://{self}/"))
            .map_err(|_| ConfigError::InvalidEndpoint(self.to_string()))
    }
}

impl Default for NodeEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_HOST, DEFAULT_RPC_PORT)
    }
}

impl fmt::Display for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NodeEndpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::InvalidEndpoint(s.to_string()))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEndpoint(s.to_string()))?;
        if host.is_empty() {
            return Err(ConfigError::InvalidEndpoint(s.to_string()));
        }
        Ok(Self::new(host, port))
    }
}

/// Node proxy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub endpoint: NodeEndpoint,
    /// Timeout of a single RPC round-trip
    #[serde(with = "duration_ms", rename = "rpc_timeout_ms")]
    pub rpc_timeout: Duration,
    /// Delay between two node status pulls
    #[serde(with = "duration_ms", rename = "pull_interval_ms")]
    pub pull_interval: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: NodeEndpoint::default(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            pull_interval: DEFAULT_PULL_INTERVAL,
        }
    }
}

impl ProxyConfig {
    pub fn new(endpoint: NodeEndpoint) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    pub fn with_pull_interval(mut self, interval: Duration) -> Self {
        self.pull_interval = interval;
        self
    }

    /// Loads configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ProxyConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.host.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint host is empty".to_string()));
        }
        if self.endpoint.port == 0 {
            return Err(ConfigError::Invalid("endpoint port is zero".to_string()));
        }
        if self.rpc_timeout.is_zero() {
            return Err(ConfigError::Invalid("rpc timeout must be positive".to_string()));
        }
        if self.pull_interval.is_zero() {
            return Err(ConfigError::Invalid("pull interval must be positive".to_string()));
        }
        Ok(())
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
