//! Chain parameter errors
//!
//! Every variant here is a defect in the constant tables or in the caller's
//! use of the registry. None of them is retried or degraded around.

use thiserror::Error;

use super::network::NetworkId;
use super::prefixes::Base58Type;
use crate::crypto::KeyError;

/// Chain parameter errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainParamsError {
    #[error("genesis hash mismatch for network {network}: expected {expected}, computed {computed}")]
    GenesisMismatch {
        network: NetworkId,
        expected: String,
        computed: String,
    },
    #[error("genesis merkle root mismatch for network {network}: expected {expected}, computed {computed}")]
    MerkleRootMismatch {
        network: NetworkId,
        expected: String,
        computed: String,
    },
    #[error("genesis bits 0x{bits:08x} for network {network} are easier than the proof-of-work limit")]
    GenesisAbovePowLimit { network: NetworkId, bits: u32 },
    #[error("invalid genesis signing key: {0}")]
    InvalidGenesisKey(KeyError),
    #[error("invalid alert key for network {network}: {source}")]
    InvalidAlertKey {
        network: NetworkId,
        #[source]
        source: KeyError,
    },
    #[error("invalid hash constant {value:?}: {reason}")]
    InvalidHashConstant { value: String, reason: String },
    #[error("checkpoint heights must be strictly increasing: {previous} then {next}")]
    CheckpointOrder { previous: u32, next: u32 },
    #[error("last checkpoint time {checkpoint_time} precedes genesis time {genesis_time} for network {network}")]
    CheckpointBeforeGenesis {
        network: NetworkId,
        checkpoint_time: i64,
        genesis_time: u32,
    },
    #[error("address prefixes {first:?} and {second:?} collide for network {network}")]
    DuplicateAddressPrefix {
        network: NetworkId,
        first: Base58Type,
        second: Base58Type,
    },
    #[error("networks {first} and {second} share message start bytes {magic}")]
    DuplicateMagic {
        first: NetworkId,
        second: NetworkId,
        magic: String,
    },
    #[error("unimplemented network: {0:?}")]
    UnknownNetwork(String),
    #[error("invalid combination of -regtest and -testnet")]
    ConflictingNetworkFlags,
    #[error("chain parameters read before any network was selected")]
    NoActiveNetwork,
    #[error("modifiable parameters requested while active network is {active}; only unittest is modifiable")]
    NotModifiable { active: NetworkId },
}

/// Result type for chain parameter operations
pub type Result<T> = std::result::Result<T, ChainParamsError>;
