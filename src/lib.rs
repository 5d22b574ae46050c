//! Chain parameter registry
//!
//! Per-network protocol constants (main, test, regtest, unittest), their
//! genesis blocks and checkpoint tables, and the process-wide selection of
//! the active network. Consensus, networking, RPC and mining code read
//! constants through [`params`] after a network is selected.

pub mod chainparams;
pub mod consensus;
pub mod crypto;

pub use chainparams::{
    modifiable_params, params, params_for, registry, select_params, select_params_from_flags,
    ChainParams, ChainParamsError, NetworkId,
};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    use crate::consensus::Amount;

    /// Base units per coin (8 decimal places)
    pub const COIN: Amount = 100_000_000;
}
