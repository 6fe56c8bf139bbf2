use clap::{Args, Parser, Subcommand};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::info;
use crate::contract::{Delegate, VOTING_AGE};
use crate::node::bootstrap::{Registry, SimulationConfig};
use crate::node::session::{ChainStatus, VotingSession};
use crate::utils::logging::init_logging;

/// CLI for running voting simulations.
#[derive(Parser)]
#[clap(name = "ballotchain", version)]
pub struct Cli {
    /// default log filter when RUST_LOG is unset
    #[clap(long, global = true, default_value = "info")]
    pub log_level: String,

    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[derive(Args, Clone)]
pub struct SessionArgs {
    /// TOML simulation config
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// RNG seed (overrides the config)
    #[clap(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Bootstrap a registry and cast random votes against it
    Simulate {
        #[clap(flatten)]
        session: SessionArgs,

        /// number of submissions (overrides the config)
        #[clap(long)]
        votes: Option<u32>,

        /// dump the full chain as JSON
        #[clap(long)]
        json: bool,
    },
    /// Submit a single vote against a fresh registry
    Vote {
        #[clap(flatten)]
        session: SessionArgs,

        /// plaintext user id, e.g. U042
        #[clap(long)]
        id: String,

        /// one of D1..D5
        #[clap(long)]
        delegate: String,
    },
    /// Print the plaintext test roster
    Roster {
        #[clap(flatten)]
        session: SessionArgs,
    },
}

fn load_config(args: &SessionArgs) -> Result<SimulationConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn bootstrap(cfg: &SimulationConfig) -> Result<(Registry, VotingSession, StdRng)> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let registry = Registry::generate(cfg, &mut rng)?;
    let session = VotingSession::with_rng(registry.eligible(), StdRng::from_rng(&mut rng)?);
    Ok((registry, session, rng))
}

/// Simulated ids are drawn a little past the registry so unknown identities show up too.
fn max_simulated_id(population: u32) -> u32 {
    population.saturating_add(population / 10).saturating_add(1)
}

fn print_status(status: &ChainStatus) {
    println!("Total blocks (incl. genesis): {}", status.blocks);
    println!("Votes recorded:               {}", status.votes_recorded);
    println!("Validators remaining:         {}", status.validators_remaining);
    println!("Tally:");
    for (delegate, n) in &status.tally {
        println!("  {}  {}", delegate, n);
    }
    match &status.integrity {
        None => println!("Chain integrity: OK"),
        Some(v) => println!("Chain integrity FAILED: {}", v),
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.cmd {
        Cmd::Simulate { session, votes, json } => {
            let mut cfg = load_config(&session)?;
            if let Some(v) = votes {
                cfg.votes = v;
            }
            let (_registry, session, mut rng) = bootstrap(&cfg)?;

            let max_id = max_simulated_id(cfg.population);
            let (mut accepted, mut rejected) = (0u32, 0u32);
            for _ in 0..cfg.votes {
                let user_id = cfg.user_id(rng.gen_range(1..=max_id));
                let delegate = if rng.gen_bool(0.05) {
                    "D0".to_string()
                } else {
                    Delegate::ALL[rng.gen_range(0..Delegate::ALL.len())].to_string()
                };
                match session.submit_vote(&user_id, &delegate) {
                    Ok(_) => accepted += 1,
                    Err(_) => rejected += 1,
                }
            }
            info!("simulation finished: {} accepted, {} rejected", accepted, rejected);

            println!("Submissions: {} accepted, {} rejected", accepted, rejected);
            print_status(&session.status());
            if json {
                println!("{}", serde_json::to_string_pretty(&session.chain())?);
            }
            Ok(())
        }
        Cmd::Vote { session, id, delegate } => {
            let cfg = load_config(&session)?;
            let (_registry, session, _rng) = bootstrap(&cfg)?;
            match session.submit_vote(&id, &delegate) {
                Ok(receipt) => println!(
                    "Vote recorded for {} in block #{}. Your identity is anonymized as {}...",
                    receipt.delegate,
                    receipt.block_index,
                    receipt.voter_hash.short(10)
                ),
                Err(e) => println!("Vote rejected: {}", e),
            }
            print_status(&session.status());
            Ok(())
        }
        Cmd::Roster { session } => {
            let cfg = load_config(&session)?;
            let (registry, _session, _rng) = bootstrap(&cfg)?;
            for entry in registry.entries() {
                let note = if entry.age >= VOTING_AGE { "" } else { "  (underage)" };
                println!("{}  {:>3}{}", entry.user_id, entry.age, note);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_ids_reach_past_registry() {
        assert_eq!(max_simulated_id(100), 111);
        assert_eq!(max_simulated_id(1), 2);
    }

    #[test]
    fn test_simulated_id_bound_saturates() {
        assert_eq!(max_simulated_id(u32::MAX), u32::MAX);
        assert_eq!(max_simulated_id(u32::MAX - 5), u32::MAX);
    }

    #[test]
    fn test_bootstrap_rejects_invalid_config() {
        let cfg = SimulationConfig { min_age: 50, max_age: 18, ..Default::default() };
        assert!(bootstrap(&cfg).is_err());
    }
}
