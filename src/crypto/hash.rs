//! Double SHA-256 hashing
//!
//! Block and transaction identifiers are SHA-256 applied twice over the
//! consensus serialization. Hashes are kept in wire byte order and shown
//! reversed, the way block explorers print them.

use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// 32-byte hash in wire (little-endian) byte order
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Create a zero hash (used for genesis previous hash)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Create hash from bytes in wire order
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Parse a hash from its display (big-endian) hex form.
    ///
    /// Accepts an optional `0x` prefix and fewer than 64 digits, in which
    /// case the value is left-padded with zeros, so `"0x001"` is the hash
    /// whose numeric value is one.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let mut digits = hex.trim();
        if let Some(stripped) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            digits = stripped;
        }
        if digits.len() > 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }

        let padded = format!("{:0>64}", digits);
        let mut arr = [0u8; 32];
        hex::decode_to_slice(&padded, &mut arr)?;
        arr.reverse();
        Ok(Hash(arr))
    }

    /// Convert to display (big-endian) hex string
    pub fn to_hex(&self) -> String {
        let mut display = self.0;
        display.reverse();
        hex::encode(display)
    }

    /// Get as bytes in wire order
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Hash(second.into())
}

/// Hash two hashes together (for Merkle tree)
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(&left.0);
    data.extend_from_slice(&right.0);
    double_sha256(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256_known_vector() {
        // sha256d("") is a well known constant
        let hash = double_sha256(b"");
        assert_eq!(
            hex::encode(hash.0),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_zero_hash() {
        let zero = Hash::zero();
        assert_eq!(zero.0, [0u8; 32]);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_short_hex_is_left_padded() {
        let one = Hash::from_hex("0x001").unwrap();
        assert_eq!(one.0[0], 1);
        assert!(one.0[1..].iter().all(|b| *b == 0));
        assert_eq!(
            one.to_hex(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_display_is_reversed_wire_order() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0xab;
        let hash = Hash::from_bytes(bytes);
        assert!(hash.to_hex().starts_with("ab"));
    }

    #[test]
    fn test_rejects_overlong_hex() {
        let too_long = "0".repeat(66);
        assert!(Hash::from_hex(&too_long).is_err());
        assert!(Hash::from_hex("0xzz").is_err());
    }

    #[test]
    fn test_hash_pair_order_matters() {
        let left = double_sha256(b"left");
        let right = double_sha256(b"right");
        assert_ne!(hash_pair(&left, &right), hash_pair(&right, &left));
    }
}
