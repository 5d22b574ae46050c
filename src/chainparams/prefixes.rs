//! Base58 address prefixes
//!
//! Encoded addresses and keys start with a version byte sequence that tells
//! a decoder what kind of payload follows and which network it belongs to.
//! Encoding itself lives with the address code.

use serde::Serialize;

use super::error::{ChainParamsError, Result};
use super::network::NetworkId;

/// Kinds of base58 payloads that carry a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

/// Prefix bytes for every [`Base58Type`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressPrefixes {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: Vec<u8>,
    pub ext_secret_key: Vec<u8>,
}

impl AddressPrefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }

    /// Reject tables where two kinds share a prefix
    pub fn ensure_distinct(&self, network: NetworkId) -> Result<()> {
        for (i, first) in Base58Type::ALL.iter().enumerate() {
            for second in &Base58Type::ALL[i + 1..] {
                if self.get(*first) == self.get(*second) {
                    return Err(ChainParamsError::DuplicateAddressPrefix {
                        network,
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }
}
