// Copyright (C) 2015-2025 The Neo Project.
//
// settings.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Command line parsing and proxy configuration resolution.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use dynex_config::{NodeEndpoint, ProxyConfig, DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use std::path::PathBuf;
use std::time::Duration;

pub fn command() -> Command {
    Command::new("dynex-node-watch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Follows a remote Dynex node and logs chain, pool and connectivity changes")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with the proxy configuration"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .env("DYNEX_NODE_HOST")
                .help("Daemon RPC host [default: 127.0.0.1]"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .env("DYNEX_NODE_PORT")
                .value_parser(value_parser!(u16).range(1..))
                .help("Daemon RPC port [default: 18333]"),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .value_name("MILLIS")
                .value_parser(value_parser!(u64).range(1..))
                .help("Timeout of a single RPC round-trip"),
        )
        .arg(
            Arg::new("pull-interval-ms")
                .long("pull-interval-ms")
                .value_name("MILLIS")
                .value_parser(value_parser!(u64).range(1..))
                .help("Delay between two node status pulls"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Emit logs as JSON lines")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Builds the proxy configuration: file first, then command line overrides.
pub fn resolve(matches: &ArgMatches) -> Result<ProxyConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ProxyConfig::load_from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ProxyConfig::new(NodeEndpoint::new(DEFAULT_RPC_HOST, DEFAULT_RPC_PORT)),
    };

    if let Some(host) = matches.get_one::<String>("host") {
        config.endpoint.host = host.clone();
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config.endpoint.port = *port;
    }
    if let Some(millis) = matches.get_one::<u64>("timeout-ms") {
        config.rpc_timeout = Duration::from_millis(*millis);
    }
    if let Some(millis) = matches.get_one::<u64>("pull-interval-ms") {
        config.pull_interval = Duration::from_millis(*millis);
    }

    config.validate().context("invalid proxy configuration")?;
    Ok(config)
}
