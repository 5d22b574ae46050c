//! Cryptography module - double SHA-256 hashing, Merkle roots, key validation

mod hash;
mod keys;
mod merkle;

pub use hash::*;
pub use keys::*;
pub use merkle::*;
