//! Consensus module - block and transaction structure, serialization, targets

mod block;
mod encode;
mod script;
mod target;
mod transaction;

pub use block::*;
pub use encode::*;
pub use script::*;
pub use target::*;
pub use transaction::*;
