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

//! # Dynex Core
//!
//! Chain primitive types exchanged between a wallet-side node access layer
//! and a remote Dynex daemon.
//!
//! - **Basic Types**: [`Hash`], [`PublicKey`] - 32-byte values with hex text form
//! - **Transactions**: [`Transaction`] blobs and explorer [`TransactionDetails`]
//! - **Blocks**: [`BlockHeaderInfo`], [`BlockDetails`] and sync entries
//! - **Outputs**: random outputs for mixing and multisignature outputs

pub mod block;
pub mod hash;
pub mod outputs;
pub mod transaction;

pub use block::{
    BlockCompleteEntry, BlockDetails, BlockHeaderInfo, BlockShortEntry, TransactionShortInfo,
};
pub use hash::{Hash, ParseHashError, PublicKey};
pub use outputs::{MultisignatureOutput, OutEntry, OutsForAmount};
pub use transaction::{
    Transaction, TransactionDetails, TransactionInputDetails, TransactionOutputDetails,
};
