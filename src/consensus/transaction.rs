//! Transaction structure
//!
//! Just enough of the transaction model to build and hash a coinbase.

use super::encode::{write_var_bytes, ConsensusEncode};
use super::script::Script;
use crate::crypto::{double_sha256, Hash};

/// Amount in base units
pub type Amount = i64;

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutPoint {
    pub txid: Hash,
    pub vout: u32,
}

impl OutPoint {
    /// The outpoint a coinbase input spends
    pub const fn null() -> Self {
        Self {
            txid: Hash::zero(),
            vout: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in base units
    pub value: Amount,
    pub script_pubkey: Script,
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Create a coinbase transaction with one input and one output
    pub fn coinbase(script_sig: Script, value: Amount, script_pubkey: Script) -> Self {
        Self {
            version: 1,
            inputs: vec![TxIn {
                prevout: OutPoint::null(),
                script_sig,
                sequence: u32::MAX,
            }],
            outputs: vec![TxOut {
                value,
                script_pubkey,
            }],
            lock_time: 0,
        }
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Transaction id
    pub fn txid(&self) -> Hash {
        double_sha256(&self.to_consensus_bytes())
    }

    pub fn total_output_value(&self) -> Amount {
        self.outputs.iter().map(|o| o.value).sum()
    }
}

impl ConsensusEncode for OutPoint {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.txid.as_bytes());
        buf.extend_from_slice(&self.vout.to_le_bytes());
    }
}

impl ConsensusEncode for TxIn {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        self.prevout.consensus_encode(buf);
        write_var_bytes(buf, self.script_sig.as_bytes());
        buf.extend_from_slice(&self.sequence.to_le_bytes());
    }
}

impl ConsensusEncode for TxOut {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.value.to_le_bytes());
        write_var_bytes(buf, self.script_pubkey.as_bytes());
    }
}

impl ConsensusEncode for Transaction {
    fn consensus_encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.version.to_le_bytes());
        self.inputs.consensus_encode(buf);
        self.outputs.consensus_encode(buf);
        buf.extend_from_slice(&self.lock_time.to_le_bytes());
    }
}
