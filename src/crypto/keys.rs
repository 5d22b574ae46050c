//! secp256k1 public key validation
//!
//! Genesis outputs and alert messages are bound to SEC1-encoded keys. The
//! parameter tables only carry the raw bytes; this module checks they name
//! a point on the curve.

use k256::PublicKey;
use thiserror::Error;

/// Public key errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid public key hex: {0}")]
    InvalidHex(String),
    #[error("Invalid public key: not a SEC1 encoded secp256k1 point")]
    InvalidPublicKey,
}

/// Raw SEC1 encoded public key (33 or 65 bytes)
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyBytes(Vec<u8>);

impl PublicKeyBytes {
    /// Decode and validate a hex encoded SEC1 key
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// Validate raw SEC1 bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, KeyError> {
        PublicKey::from_sec1_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_compressed(&self) -> bool {
        self.0.len() == 33
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl std::fmt::Debug for PublicKeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKeyBytes({})", self.to_hex())
    }
}
