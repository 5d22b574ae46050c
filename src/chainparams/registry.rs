//! Network registry and active-network selection
//!
//! One profile per [`NetworkId`] is built when the registry is created and
//! lives as long as the registry. Nothing is active until [`select`] is
//! called; reading the active profile before that is a caller bug.
//!
//! The unittest profile is the only one that can change after construction,
//! and only through [`ModifiableParams`] while unittest is the active
//! network. Readers get an `Arc` snapshot, so a mutation is visible to the
//! next read, never to a snapshot already handed out.
//!
//! [`select`]: NetworkRegistry::select

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::error::{ChainParamsError, Result};
use super::network::NetworkId;
use super::params::ChainParams;

/// Holds every network's profile and which one is active
pub struct NetworkRegistry {
    main: Arc<ChainParams>,
    test: Arc<ChainParams>,
    regtest: Arc<ChainParams>,
    /// Copy-on-write under a lock, changed only through [`ModifiableParams`]
    unittest: RwLock<Arc<ChainParams>>,
    active: RwLock<Option<NetworkId>>,
}

impl NetworkRegistry {
    /// Build and validate all four profiles.
    ///
    /// Fails if any profile breaks an invariant, most importantly a genesis
    /// hash that differs from its recorded value.
    pub fn new() -> Result<Self> {
        let main = ChainParams::main()?;
        let test = ChainParams::testnet_from(&main)?;
        let regtest = ChainParams::regtest_from(&test)?;
        let unittest = ChainParams::unittest_from(&main);

        for params in [&main, &test, &regtest, &unittest] {
            params.validate()?;
        }
        ensure_distinct_magic(&[&main, &test, &regtest])?;

        debug!("chain parameter registry built");
        Ok(Self {
            main: Arc::new(main),
            test: Arc::new(test),
            regtest: Arc::new(regtest),
            unittest: RwLock::new(Arc::new(unittest)),
            active: RwLock::new(None),
        })
    }

    /// Profile for `network`, whether or not it is active
    pub fn get(&self, network: NetworkId) -> Arc<ChainParams> {
        match network {
            NetworkId::Main => Arc::clone(&self.main),
            NetworkId::Test => Arc::clone(&self.test),
            NetworkId::Regtest => Arc::clone(&self.regtest),
            NetworkId::Unittest => Arc::clone(&self.unittest.read()),
        }
    }

    /// Profile for a network given by name
    pub fn get_by_name(&self, name: &str) -> Result<Arc<ChainParams>> {
        Ok(self.get(name.parse()?))
    }

    /// Make `network` the active profile
    pub fn select(&self, network: NetworkId) {
        let mut active = self.active.write();
        if let Some(previous) = active.replace(network) {
            if previous != network {
                warn!(previous = %previous, network = %network, "replacing selected network");
            }
        }
        info!(network = %network, "selected chain parameters");
    }

    /// Currently selected network, if any
    pub fn active_network(&self) -> Option<NetworkId> {
        *self.active.read()
    }

    /// Active profile, or [`ChainParamsError::NoActiveNetwork`]
    pub fn try_active(&self) -> Result<Arc<ChainParams>> {
        self.active_network()
            .map(|network| self.get(network))
            .ok_or(ChainParamsError::NoActiveNetwork)
    }

    /// Active profile.
    ///
    /// # Panics
    ///
    /// Panics if no network has been selected.
    pub fn active(&self) -> Arc<ChainParams> {
        self.try_active().unwrap_or_else(|err| fatal(err))
    }

    /// Mutation handle for the unittest profile.
    ///
    /// Only granted while unittest is the active network.
    pub fn modifiable(&self) -> Result<ModifiableParams<'_>> {
        self.ensure_unittest_active()?;
        Ok(ModifiableParams { registry: self })
    }

    fn ensure_unittest_active(&self) -> Result<()> {
        match self.active_network() {
            Some(NetworkId::Unittest) => Ok(()),
            Some(active) => Err(ChainParamsError::NotModifiable { active }),
            None => Err(ChainParamsError::NoActiveNetwork),
        }
    }
}

fn ensure_distinct_magic(profiles: &[&ChainParams]) -> Result<()> {
    for (i, first) in profiles.iter().enumerate() {
        for second in &profiles[i + 1..] {
            if first.message_start == second.message_start {
                return Err(ChainParamsError::DuplicateMagic {
                    first: first.network,
                    second: second.network,
                    magic: hex::encode(first.message_start),
                });
            }
        }
    }
    Ok(())
}

fn fatal(err: ChainParamsError) -> ! {
    error!(%err, "fatal chain parameter error");
    panic!("{err}");
}

/// Setters for the handful of unittest fields test fixtures may change.
///
/// Each setter takes the profile's write lock, then re-checks that
/// unittest is still the active network before changing anything.
pub struct ModifiableParams<'a> {
    registry: &'a NetworkRegistry,
}

impl ModifiableParams<'_> {
    fn modify<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut ChainParams),
    {
        let mut guard = self.registry.unittest.write();
        self.registry.ensure_unittest_active()?;
        apply(Arc::make_mut(&mut guard));
        Ok(())
    }

    pub fn set_subsidy_halving_interval(&self, interval: u32) -> Result<()> {
        self.modify(|p| p.subsidy_halving_interval = interval)
    }

    pub fn set_enforce_block_upgrade_majority(&self, threshold: u32) -> Result<()> {
        self.modify(|p| p.majority.enforce_block_upgrade = threshold)
    }

    pub fn set_reject_block_outdated_majority(&self, threshold: u32) -> Result<()> {
        self.modify(|p| p.majority.reject_block_outdated = threshold)
    }

    pub fn set_to_check_block_upgrade_majority(&self, window: u32) -> Result<()> {
        self.modify(|p| p.majority.window = window)
    }

    pub fn set_default_check_mempool(&self, enabled: bool) -> Result<()> {
        self.modify(|p| p.policy.default_check_mempool = enabled)
    }

    pub fn set_allow_min_difficulty_blocks(&self, enabled: bool) -> Result<()> {
        self.modify(|p| p.policy.allow_min_difficulty_blocks = enabled)
    }

    pub fn set_skip_proof_of_work_check(&self, enabled: bool) -> Result<()> {
        self.modify(|p| p.policy.skip_proof_of_work_check = enabled)
    }
}

static REGISTRY: Lazy<NetworkRegistry> =
    Lazy::new(|| NetworkRegistry::new().unwrap_or_else(|err| fatal(err)));

/// Process-wide registry, built on first use.
///
/// # Panics
///
/// Panics on first use if any profile fails validation.
pub fn registry() -> &'static NetworkRegistry {
    &REGISTRY
}

/// Select the process-wide active network
pub fn select_params(network: NetworkId) {
    registry().select(network);
}

/// Select from the legacy `-testnet` / `-regtest` switches
pub fn select_params_from_flags(testnet: bool, regtest: bool) -> Result<NetworkId> {
    let network = NetworkId::from_flags(testnet, regtest)?;
    select_params(network);
    Ok(network)
}

/// Process-wide active profile.
///
/// # Panics
///
/// Panics if no network has been selected.
pub fn params() -> Arc<ChainParams> {
    registry().active()
}

/// Process-wide profile for `network`
pub fn params_for(network: NetworkId) -> Arc<ChainParams> {
    registry().get(network)
}

/// Process-wide unittest mutation handle.
///
/// # Panics
///
/// Panics unless unittest is the active network.
pub fn modifiable_params() -> ModifiableParams<'static> {
    registry().modifiable().unwrap_or_else(|err| fatal(err))
}
