// Copyright (C) 2015-2025 The Neo Project.
//
// outputs.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::hash::PublicKey;
use serde::{Deserialize, Serialize};

/// One decoy candidate for ring signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutEntry {
    pub global_amount_index: u32,
    pub out_key: PublicKey,
}

/// Random outputs picked by the node for a single amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutsForAmount {
    pub amount: u64,
    pub outs: Vec<OutEntry>,
}

/// A multisignature output located by amount and global index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisignatureOutput {
    pub keys: Vec<PublicKey>,
    pub required_signature_count: u32,
    /// Unlock term of the output, zero when unrestricted.
    #[serde(default)]
    pub term: u32,
}
