//! Genesis block construction
//!
//! Each network's first block is assembled from a handful of literals and
//! hashed at startup. The result is compared against a recorded hash, so a
//! mistyped constant stops the node instead of forking it off the network.

use crate::consensus::{Amount, Block, BlockHeader, Script, Transaction, OP_CHECKSIG};
use crate::crypto::{Hash, PublicKeyBytes};

use super::error::{ChainParamsError, Result};
use super::network::NetworkId;

/// Genesis block version
pub const GENESIS_VERSION: i32 = 1;

/// Extra nonce pushed after the bits in the genesis coinbase
const GENESIS_EXTRA_NONCE: i64 = 4;

/// A fully built, immutable genesis block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisBlockDescriptor {
    timestamp: String,
    reward: Amount,
    signing_key: PublicKeyBytes,
    block: Block,
    hash: Hash,
}

impl GenesisBlockDescriptor {
    /// Build the genesis block.
    ///
    /// The coinbase input carries `bits`, an extra nonce and the timestamp
    /// text; its single output pays `reward` to `signing_key` under a
    /// pay-to-pubkey script. Its output cannot be spent since it never
    /// existed in the coin database.
    pub fn build(
        timestamp: &str,
        reward: Amount,
        signing_key: PublicKeyBytes,
        time: u32,
        bits: u32,
        nonce: u32,
    ) -> Self {
        let script_sig = Script::new()
            .push_int(bits as i64)
            .push_num(GENESIS_EXTRA_NONCE)
            .push_slice(timestamp.as_bytes());
        let script_pubkey = Script::new()
            .push_slice(signing_key.as_bytes())
            .push_opcode(OP_CHECKSIG);
        let coinbase = Transaction::coinbase(script_sig, reward, script_pubkey);

        let header = BlockHeader {
            version: GENESIS_VERSION,
            prev_hash: Hash::zero(),
            merkle_root: coinbase.txid(),
            time,
            bits,
            nonce,
        };
        let block = Block::new(header, vec![coinbase]);
        let hash = block.hash();

        Self {
            timestamp: timestamp.to_string(),
            reward,
            signing_key,
            block,
            hash,
        }
    }

    /// Same coinbase, different mining parameters.
    ///
    /// Derived networks keep the parent's transaction and only re-stamp the
    /// header, so the merkle root is shared across the override chain.
    pub fn with_header(&self, time: u32, bits: u32, nonce: u32) -> Self {
        let mut block = self.block.clone();
        block.header.time = time;
        block.header.bits = bits;
        block.header.nonce = nonce;
        let hash = block.hash();

        Self {
            timestamp: self.timestamp.clone(),
            reward: self.reward,
            signing_key: self.signing_key.clone(),
            block,
            hash,
        }
    }

    /// Verify genesis block matches expected hash
    pub fn verify(&self, expected_hash: &Hash) -> bool {
        self.hash == *expected_hash
    }

    /// Like [`verify`](Self::verify), but reports which network failed
    pub fn ensure_hash(&self, network: NetworkId, expected_hash: &Hash) -> Result<()> {
        if self.verify(expected_hash) {
            return Ok(());
        }
        Err(ChainParamsError::GenesisMismatch {
            network,
            expected: expected_hash.to_hex(),
            computed: self.hash.to_hex(),
        })
    }

    pub fn ensure_merkle_root(&self, network: NetworkId, expected_root: &Hash) -> Result<()> {
        if self.merkle_root() == *expected_root {
            return Ok(());
        }
        Err(ChainParamsError::MerkleRootMismatch {
            network,
            expected: expected_root.to_hex(),
            computed: self.merkle_root().to_hex(),
        })
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn merkle_root(&self) -> Hash {
        self.block.header.merkle_root
    }

    pub fn prev_hash(&self) -> Hash {
        self.block.header.prev_hash
    }

    pub fn time(&self) -> u32 {
        self.block.header.time
    }

    pub fn bits(&self) -> u32 {
        self.block.header.bits
    }

    pub fn nonce(&self) -> u32 {
        self.block.header.nonce
    }

    pub fn timestamp_text(&self) -> &str {
        &self.timestamp
    }

    pub fn reward(&self) -> Amount {
        self.reward
    }

    pub fn signing_key(&self) -> &PublicKeyBytes {
        &self.signing_key
    }

    pub fn block(&self) -> &Block {
        &self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "04cd418a4e7344fd3976b49e7bf137f7cec2d583490b578168efbda667e51d5cff158623244da94b719dd8efe63b4cec2425f15ee3025b38b2db073fb2eef8b592";
    const TIMESTAMP: &str = "shanghai stock index closed at 2343.57, on 30th Dec., 2017";

    fn build(nonce: u32) -> GenesisBlockDescriptor {
        let key = PublicKeyBytes::from_hex(KEY).unwrap();
        GenesisBlockDescriptor::build(
            TIMESTAMP,
            200 * 100_000_000,
            key,
            1411666331,
            0x1d00ffff,
            nonce,
        )
    }

    #[test]
    fn test_genesis_is_deterministic() {
        assert_eq!(build(2056985438).hash(), build(2056985438).hash());
    }

    #[test]
    fn test_genesis_matches_recorded_values() {
        let genesis = build(2056985438);
        assert_eq!(
            genesis.merkle_root().to_hex(),
            "405a198c9bcd21e2277095624ebe3f133d41a31cd3fe09b10d9af8e47d52629f"
        );
        let expected =
            Hash::from_hex("3f6c385accc8047f8e45d578e5fe1ed656e36fa7acdce88762858851b28b119b")
                .unwrap();
        assert!(genesis.verify(&expected));
        assert!(genesis.ensure_hash(NetworkId::Main, &expected).is_ok());
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = build(0);
        let block = genesis.block();
        assert!(block.is_genesis());
        assert_eq!(block.transactions.len(), 1);
        assert!(block.transactions[0].is_coinbase());
        assert_eq!(block.transactions[0].total_output_value(), 200 * 100_000_000);
        assert_eq!(block.compute_merkle_root(), genesis.merkle_root());

        let script_sig = block.transactions[0].inputs[0].script_sig.as_bytes();
        assert_eq!(&script_sig[..7], &[0x04, 0xff, 0xff, 0x00, 0x1d, 0x01, 0x04]);
        assert_eq!(script_sig[7] as usize, TIMESTAMP.len());
    }

    #[test]
    fn test_with_header_keeps_coinbase() {
        let main = build(2056985438);
        let test = main.with_header(1411666331, 0x207fffff, 6);
        assert_eq!(test.merkle_root(), main.merkle_root());
        assert_eq!(test.bits(), 0x207fffff);
        assert_ne!(test.hash(), main.hash());
        assert_eq!(
            test.hash().to_hex(),
            "0f4e394f3df2d094ddf8e8d912d85d5f2184b00dd67e363612a80dc4bf7314b5"
        );
    }

    #[test]
    fn test_mismatch_names_network() {
        let err = build(1).ensure_hash(NetworkId::Test, &Hash::zero()).unwrap_err();
        assert!(err.to_string().starts_with("genesis hash mismatch for network test"));
    }
}
