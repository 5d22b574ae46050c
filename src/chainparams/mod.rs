//! Chain parameters - per-network constants, genesis blocks, checkpoints and
//! active-network selection

mod checkpoints;
mod error;
mod genesis;
mod network;
mod params;
mod prefixes;
mod registry;
mod seeds;

pub use checkpoints::*;
pub use error::*;
pub use genesis::*;
pub use network::*;
pub use params::*;
pub use prefixes::*;
pub use registry::*;
pub use seeds::*;
