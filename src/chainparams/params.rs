//! Per-network chain parameter profiles
//!
//! Main is written out from literals. Every other profile starts as a copy
//! of its parent and then overrides a subset of fields:
//!
//! ```text
//! main ──► test ──► regtest
//!   └────► unittest
//! ```
//!
//! Children copy their parent by value, so a later change to a parent never
//! reaches a child that was already derived.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::consensus::{Amount, Target};
use crate::constants::COIN;
use crate::crypto::{Hash, PublicKeyBytes};

use super::checkpoints::CheckpointData;
use super::error::{ChainParamsError, Result};
use super::genesis::GenesisBlockDescriptor;
use super::network::NetworkId;
use super::prefixes::AddressPrefixes;
use super::seeds::{convert_seed6, DnsSeed, SeedAddress, MAIN_FIXED_SEEDS, TEST_FIXED_SEEDS};

const GENESIS_TIMESTAMP: &str = "shanghai stock index closed at 2343.57, on 30th Dec., 2017";
const GENESIS_SIGNING_KEY: &str = "04cd418a4e7344fd3976b49e7bf137f7cec2d583490b578168efbda667e51d5cff158623244da94b719dd8efe63b4cec2425f15ee3025b38b2db073fb2eef8b592";
const GENESIS_MERKLE_ROOT: &str = "0x405a198c9bcd21e2277095624ebe3f133d41a31cd3fe09b10d9af8e47d52629f";

const MAIN_GENESIS_HASH: &str = "0x3f6c385accc8047f8e45d578e5fe1ed656e36fa7acdce88762858851b28b119b";
const TEST_GENESIS_HASH: &str = "0x0f4e394f3df2d094ddf8e8d912d85d5f2184b00dd67e363612a80dc4bf7314b5";
const REGTEST_GENESIS_HASH: &str = "0x59b1bc14be3b72f6787993e98d62a74a081963aac27d7d276f491f541f42e790";

const MAIN_ALERT_KEY: &str = "0420072dbff945ab3dbd3ad0c4ac98397af586fb655d5151c087057a132daec563ca70654af670017796252dcb4d058d50d027c0bec058b12d06688ff6518fdcb8";
const TEST_ALERT_KEY: &str = "045d2d29beffb0a0cbea44f266286ff8b1d11c035538fbb4dadcf6b4073b08f318afea74f01d5a3782e72a22273fb01ab40e99d93adff488236585cc8031323e7c";

/// Soft-fork activation vote thresholds, counted over the last `window` blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MajorityThresholds {
    /// Blocks of a new version needed before its rules are enforced
    pub enforce_block_upgrade: u32,
    /// Blocks of a new version needed before old versions are rejected
    pub reject_block_outdated: u32,
    /// Sample window
    pub window: u32,
}

/// Policy switches read by mining, mempool and RPC code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyFlags {
    pub require_rpc_password: bool,
    pub mining_requires_peers: bool,
    pub default_check_mempool: bool,
    /// Permit minimum-difficulty blocks when the chain stalls
    pub allow_min_difficulty_blocks: bool,
    pub require_standard: bool,
    /// Blocks are mined by RPC request rather than continuously
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
}

/// Every protocol constant for one network
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub network: NetworkId,
    /// Message start bytes framing every wire message
    pub message_start: [u8; 4],
    pub alert_key: PublicKeyBytes,
    pub default_port: u16,
    /// Largest target a block may claim
    pub pow_limit: Target,
    pub subsidy_halving_interval: u32,
    pub majority: MajorityThresholds,
    /// 0 means one thread per CPU
    pub miner_threads: u32,
    /// Retargeting window in seconds
    pub target_timespan: u64,
    /// Desired seconds between blocks
    pub target_spacing: u64,
    /// Genesis coinbase value in whole coins
    pub genesis_subsidy: Amount,
    pub genesis: Arc<GenesisBlockDescriptor>,
    /// Hash the genesis block must have
    pub expected_genesis_hash: Hash,
    pub checkpoints: Arc<CheckpointData>,
    pub base58_prefixes: AddressPrefixes,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<SeedAddress>,
    pub policy: PolicyFlags,
}

fn parse_hash_constant(value: &str) -> Result<Hash> {
    Hash::from_hex(value).map_err(|e| ChainParamsError::InvalidHashConstant {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_alert_key(network: NetworkId, hex: &str) -> Result<PublicKeyBytes> {
    PublicKeyBytes::from_hex(hex)
        .map_err(|source| ChainParamsError::InvalidAlertKey { network, source })
}

impl ChainParams {
    /// Production network, built from literals
    pub fn main() -> Result<Self> {
        let network = NetworkId::Main;
        let genesis_subsidy = 200;

        let signing_key = PublicKeyBytes::from_hex(GENESIS_SIGNING_KEY)
            .map_err(ChainParamsError::InvalidGenesisKey)?;
        let genesis = GenesisBlockDescriptor::build(
            GENESIS_TIMESTAMP,
            genesis_subsidy * COIN,
            signing_key,
            1411666331,
            0x1d00ffff,
            2056985438,
        );
        let expected_genesis_hash = parse_hash_constant(MAIN_GENESIS_HASH)?;

        let checkpoints = CheckpointData::new(
            vec![(0, expected_genesis_hash)],
            1512025515,
            10,
            60000.0,
        )?;

        let params = Self {
            network,
            message_start: [0x90, 0x0d, 0xf1, 0x0d],
            alert_key: parse_alert_key(network, MAIN_ALERT_KEY)?,
            default_port: 9488,
            pow_limit: Target::max_shifted_right(8),
            subsidy_halving_interval: 2_100_000,
            majority: MajorityThresholds {
                enforce_block_upgrade: 750,
                reject_block_outdated: 950,
                window: 1000,
            },
            miner_threads: 1,
            // Retarget every hour, one block a minute
            target_timespan: 60 * 60,
            target_spacing: 60,
            genesis_subsidy,
            genesis: Arc::new(genesis),
            expected_genesis_hash,
            checkpoints: Arc::new(checkpoints),
            base58_prefixes: AddressPrefixes {
                pubkey_address: vec![35],
                script_address: vec![65],
                secret_key: vec![45],
                ext_public_key: vec![0x04, 0x88, 0xee, 0x35],
                ext_secret_key: vec![0x04, 0x88, 0xee, 0x45],
            },
            dns_seeds: Vec::new(),
            fixed_seeds: convert_seed6(MAIN_FIXED_SEEDS),
            policy: PolicyFlags {
                require_rpc_password: true,
                mining_requires_peers: false,
                default_check_mempool: false,
                allow_min_difficulty_blocks: true,
                require_standard: true,
                mine_blocks_on_demand: false,
                skip_proof_of_work_check: false,
                testnet_to_be_deprecated_field_rpc: false,
            },
        };

        debug!(network = %network, genesis = %params.genesis.hash(), "built chain parameters");
        Ok(params)
    }

    /// Public test network, derived from main
    pub fn testnet_from(main: &ChainParams) -> Result<Self> {
        let network = NetworkId::Test;
        let mut params = main.clone();

        params.network = network;
        params.message_start = [0xc0, 0x1d, 0xf1, 0x0d];
        params.alert_key = parse_alert_key(network, TEST_ALERT_KEY)?;
        params.default_port = 19488;
        params.pow_limit = Target::max_shifted_right(1);
        params.majority = MajorityThresholds {
            enforce_block_upgrade: 51,
            reject_block_outdated: 75,
            window: 100,
        };
        params.miner_threads = 0;
        params.target_timespan = 14 * 24 * 60 * 60;
        params.target_spacing = 10 * 60;

        // Later start time, trivial difficulty
        params.genesis = Arc::new(main.genesis.with_header(1411666331, 0x207fffff, 6));
        params.expected_genesis_hash = parse_hash_constant(TEST_GENESIS_HASH)?;
        params.checkpoints = Arc::new(CheckpointData::new(
            vec![(0, params.expected_genesis_hash)],
            1512025519,
            1488,
            300.0,
        )?);

        params.fixed_seeds = convert_seed6(TEST_FIXED_SEEDS);
        params.dns_seeds.clear();

        params.base58_prefixes = AddressPrefixes {
            pubkey_address: vec![111],
            script_address: vec![196],
            secret_key: vec![239],
            ext_public_key: vec![0x04, 0x35, 0x87, 0xcf],
            ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
        };

        params.policy.require_rpc_password = true;
        params.policy.mining_requires_peers = true;
        params.policy.default_check_mempool = false;
        params.policy.allow_min_difficulty_blocks = true;
        params.policy.require_standard = false;
        params.policy.mine_blocks_on_demand = false;
        params.policy.testnet_to_be_deprecated_field_rpc = true;

        debug!(network = %network, parent = %main.network, "derived chain parameters");
        Ok(params)
    }

    /// Regression-test network, derived from test
    pub fn regtest_from(test: &ChainParams) -> Result<Self> {
        let network = NetworkId::Regtest;
        let mut params = test.clone();

        params.network = network;
        params.message_start = [0x0b, 0xad, 0xf1, 0x0d];
        params.default_port = 29488;
        params.pow_limit = Target::max_shifted_right(1);
        params.subsidy_halving_interval = 150;
        params.majority = MajorityThresholds {
            enforce_block_upgrade: 750,
            reject_block_outdated: 950,
            window: 1000,
        };
        params.miner_threads = 1;
        params.target_timespan = 14 * 24 * 60 * 60;
        params.target_spacing = 10 * 60;

        params.genesis = Arc::new(test.genesis.with_header(1296688602, 0x207fffff, 2));
        params.expected_genesis_hash = parse_hash_constant(REGTEST_GENESIS_HASH)?;
        // No transaction history to speak of; the checkpoint sits at genesis time.
        params.checkpoints = Arc::new(CheckpointData::new(
            vec![(0, params.expected_genesis_hash)],
            params.genesis.time() as i64,
            0,
            0.0,
        )?);

        params.fixed_seeds.clear();
        params.dns_seeds.clear();

        params.policy.require_rpc_password = false;
        params.policy.mining_requires_peers = false;
        params.policy.default_check_mempool = true;
        params.policy.allow_min_difficulty_blocks = true;
        params.policy.require_standard = false;
        params.policy.mine_blocks_on_demand = true;
        params.policy.testnet_to_be_deprecated_field_rpc = false;

        debug!(network = %network, parent = %test.network, "derived chain parameters");
        Ok(params)
    }

    /// In-process unit-test network, derived from main.
    ///
    /// Shares main's checkpoint table instance rather than copying it.
    pub fn unittest_from(main: &ChainParams) -> Self {
        let network = NetworkId::Unittest;
        let mut params = main.clone();

        params.network = network;
        params.default_port = 18445;
        params.fixed_seeds.clear();
        params.dns_seeds.clear();

        params.policy.require_rpc_password = false;
        params.policy.mining_requires_peers = false;
        params.policy.default_check_mempool = true;
        params.policy.allow_min_difficulty_blocks = false;
        params.policy.mine_blocks_on_demand = true;

        debug!(network = %network, parent = %main.network, "derived chain parameters");
        params
    }

    /// Check the invariants every profile must satisfy
    pub fn validate(&self) -> Result<()> {
        self.genesis.ensure_hash(self.network, &self.expected_genesis_hash)?;
        self.genesis
            .ensure_merkle_root(self.network, &parse_hash_constant(GENESIS_MERKLE_ROOT)?)?;

        match Target::from_compact(self.genesis.bits()) {
            Some(target) if target <= self.pow_limit => {}
            _ => {
                return Err(ChainParamsError::GenesisAbovePowLimit {
                    network: self.network,
                    bits: self.genesis.bits(),
                })
            }
        }

        if self.checkpoints.last_checkpoint_time() < self.genesis.time() as i64 {
            return Err(ChainParamsError::CheckpointBeforeGenesis {
                network: self.network,
                checkpoint_time: self.checkpoints.last_checkpoint_time(),
                genesis_time: self.genesis.time(),
            });
        }

        self.base58_prefixes.ensure_distinct(self.network)
    }

    /// Checkpoint table for this network
    pub fn checkpoints(&self) -> &CheckpointData {
        &self.checkpoints
    }

    pub fn network_id_string(&self) -> &'static str {
        self.network.as_str()
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis.hash()
    }

    /// Blocks between difficulty retargets
    pub fn difficulty_adjustment_interval(&self) -> u64 {
        self.target_timespan / self.target_spacing
    }

    pub fn base58_prefix(&self, kind: super::prefixes::Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    /// Whether this profile reuses `other`'s checkpoint table instance
    pub fn shares_checkpoints_with(&self, other: &ChainParams) -> bool {
        Arc::ptr_eq(&self.checkpoints, &other.checkpoints)
    }
}

/// Flattened view of a profile for display and RPC
#[derive(Debug, Clone, Serialize)]
pub struct ParamsInfo {
    pub network: NetworkId,
    pub message_start: String,
    pub default_port: u16,
    pub pow_limit: String,
    pub pow_limit_bits: String,
    pub subsidy_halving_interval: u32,
    pub majority: MajorityThresholds,
    pub target_timespan: u64,
    pub target_spacing: u64,
    pub difficulty_adjustment_interval: u64,
    pub genesis_hash: String,
    pub genesis_merkle_root: String,
    pub genesis_time: u32,
    pub genesis_bits: String,
    pub genesis_nonce: u32,
    pub checkpoint_count: usize,
    pub last_checkpoint_time: i64,
    pub tx_count_at_last_checkpoint: u64,
    pub estimated_tx_per_day_after: f64,
    pub base58_prefixes: AddressPrefixes,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seed_count: usize,
    pub policy: PolicyFlags,
}

impl From<&ChainParams> for ParamsInfo {
    fn from(params: &ChainParams) -> Self {
        Self {
            network: params.network,
            message_start: hex::encode(params.message_start),
            default_port: params.default_port,
            pow_limit: params.pow_limit.to_hex(),
            pow_limit_bits: format!("{:08x}", params.pow_limit.to_compact()),
            subsidy_halving_interval: params.subsidy_halving_interval,
            majority: params.majority,
            target_timespan: params.target_timespan,
            target_spacing: params.target_spacing,
            difficulty_adjustment_interval: params.difficulty_adjustment_interval(),
            genesis_hash: params.genesis.hash().to_hex(),
            genesis_merkle_root: params.genesis.merkle_root().to_hex(),
            genesis_time: params.genesis.time(),
            genesis_bits: format!("{:08x}", params.genesis.bits()),
            genesis_nonce: params.genesis.nonce(),
            checkpoint_count: params.checkpoints.len(),
            last_checkpoint_time: params.checkpoints.last_checkpoint_time(),
            tx_count_at_last_checkpoint: params.checkpoints.tx_count_at_last_checkpoint(),
            estimated_tx_per_day_after: params.checkpoints.estimated_tx_per_day_after(),
            base58_prefixes: params.base58_prefixes.clone(),
            dns_seeds: params.dns_seeds.clone(),
            fixed_seed_count: params.fixed_seeds.len(),
            policy: params.policy,
        }
    }
}
