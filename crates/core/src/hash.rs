// Copyright (C) 2015-2025 The Neo Project.
//
// hash.rs file belongs to the dynex-rs project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Fixed-size 32-byte values: block/transaction hashes and public keys.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a 32-byte value from its hex form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseHashError {
    /// The string does not encode exactly 32 bytes.
    #[error("invalid length: expected 64 hex characters, got {0}")]
    InvalidLength(usize),

    /// The string contains non-hex characters.
    #[error("invalid hexadecimal string")]
    InvalidHex,
}

macro_rules! bytes32 {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; 32]);

        impl $name {
            /// The length of the value in bytes.
            pub const LENGTH: usize = 32;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; 32]);

            /// Wraps raw bytes.
            pub const fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Builds a value from a slice, failing unless it is exactly 32 bytes long.
            pub fn from_slice(slice: &[u8]) -> Result<Self, ParseHashError> {
                let bytes: [u8; 32] = slice
                    .try_into()
                    .map_err(|_| ParseHashError::InvalidLength(slice.len() * 2))?;
                Ok(Self(bytes))
            }

            /// Returns the underlying bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Returns `true` for the all-zero value.
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self)
            }
        }

        impl FromStr for $name {
            type Err = ParseHashError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                if s.len() != Self::LENGTH * 2 {
                    return Err(ParseHashError::InvalidLength(s.len()));
                }
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseHashError::InvalidHex)?;
                Ok(Self(bytes))
            }
        }

        // Hex strings for JSON, raw bytes for the binary encoding.
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_string())
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let text = Cow::<str>::deserialize(deserializer)?;
                    text.parse().map_err(D::Error::custom)
                } else {
                    <[u8; 32]>::deserialize(deserializer).map(Self)
                }
            }
        }
    };
}

bytes32!(
    /// A Keccak-256 digest identifying a block or a transaction.
    Hash
);

bytes32!(
    /// A compressed curve point used as an output or multisignature key.
    PublicKey
);

impl Hash {
    /// Computes the fast hash (Keccak-256) of `data`.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_zero() {
        assert!(Hash::ZERO.is_zero());
        assert_eq!(Hash::default(), Hash::ZERO);
    }

    #[test]
    fn test_hash_display_and_parse() {
        let s = "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20";
        let hash: Hash = s.parse().unwrap();
        assert_eq!(hash.to_string(), s);
        assert_eq!(hash.as_bytes()[0], 1);
        assert_eq!(format!("0x{s}").parse::<Hash>().unwrap(), hash);
    }

    #[test]
    fn test_hash_parse_errors() {
        assert_eq!("abcd".parse::<Hash>(), Err(ParseHashError::InvalidLength(4)));
        let bad = "zz".repeat(32);
        assert_eq!(bad.parse::<Hash>(), Err(ParseHashError::InvalidHex));
        assert!(Hash::from_slice(&[0u8; 31]).is_err());
    }

    #[test]
    fn test_hash_json_is_hex_string() {
        let hash = Hash::new([0xab; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let parsed: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn test_hash_binary_is_raw_bytes() {
        let key = PublicKey::new([7u8; 32]);
        let encoded = bincode::serialize(&key).unwrap();
        assert_eq!(encoded.len(), 32);
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_keccak_digest_of_empty_input() {
        assert_eq!(
            Hash::digest(&[]).to_string(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hash_ordering() {
        let a = Hash::new([1u8; 32]);
        let b = Hash::new([2u8; 32]);
        assert!(a < b);
    }
}
