//! Chain parameter inspector
//!
//! Selects a network the way a node does at startup and prints the
//! parameters every other subsystem would read.

use anyhow::Context;
use chain_params::chainparams::{CheckpointData, ParamsInfo};
use chain_params::{params, select_params, NetworkId};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "chain-params")]
#[command(about = "Select a network and show its chain parameters", long_about = None)]
struct Cli {
    /// Network to select (main, test, regtest, unittest)
    #[arg(short, long, env = "CHAIN_NETWORK", conflicts_with_all = ["testnet", "regtest"])]
    network: Option<String>,

    /// Use the public test network
    #[arg(long)]
    testnet: bool,

    /// Use the local regression-test network
    #[arg(long)]
    regtest: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn network(&self) -> anyhow::Result<NetworkId> {
        match &self.network {
            Some(name) => Ok(name.parse()?),
            None => Ok(NetworkId::from_flags(self.testnet, self.regtest)?),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let network = cli.network().context("choosing network")?;
    select_params(network);

    let active = params();
    info!(network = %active.network, genesis = %active.genesis_hash(), "chain parameters ready");

    let summary = ParamsInfo::from(active.as_ref());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, active.checkpoints());
    }

    Ok(())
}

fn print_summary(info: &ParamsInfo, checkpoints: &CheckpointData) {
    println!("Network:            {}", info.network);
    println!("  Message start:    {}", info.message_start);
    println!("  Default port:     {}", info.default_port);
    println!("  PoW limit:        {} (bits {})", info.pow_limit, info.pow_limit_bits);
    println!("  Halving interval: {}", info.subsidy_halving_interval);
    println!(
        "  Majority:         {}/{} of {}",
        info.majority.enforce_block_upgrade,
        info.majority.reject_block_outdated,
        info.majority.window
    );
    println!(
        "  Timespan:         {}s every {} blocks of {}s",
        info.target_timespan, info.difficulty_adjustment_interval, info.target_spacing
    );
    println!();
    println!("Genesis Block:");
    println!("  Hash:        {}", info.genesis_hash);
    println!("  Merkle Root: {}", info.genesis_merkle_root);
    println!("  Time:        {}", info.genesis_time);
    println!("  Bits:        0x{}", info.genesis_bits);
    println!("  Nonce:       {}", info.genesis_nonce);
    println!();
    println!("Checkpoints:");
    for (height, hash) in checkpoints.iter() {
        println!("  {:>8}  {}", height, hash);
    }
    println!("  Last checkpoint time: {}", info.last_checkpoint_time);
    println!("  Transactions at last: {}", info.tx_count_at_last_checkpoint);
    println!("  Est. tx/day after:    {}", info.estimated_tx_per_day_after);
    println!();
    println!("Address prefixes:");
    println!("  Pubkey address: {}", hex::encode(&info.base58_prefixes.pubkey_address));
    println!("  Script address: {}", hex::encode(&info.base58_prefixes.script_address));
    println!("  Secret key:     {}", hex::encode(&info.base58_prefixes.secret_key));
    println!("  Ext public key: {}", hex::encode(&info.base58_prefixes.ext_public_key));
    println!("  Ext secret key: {}", hex::encode(&info.base58_prefixes.ext_secret_key));
    println!();
    println!("Seeds: {} DNS, {} fixed", info.dns_seeds.len(), info.fixed_seed_count);
    println!("Policy: {:?}", info.policy);
}
