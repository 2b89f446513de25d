//! Spa Simulator CLI
//!
//! Drives a simulated fleet the way the client app's development harness
//! does: build the fleet, advertise it, then tick every device once per
//! interval until the tick budget runs out or Ctrl+C arrives.

mod driver;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use spa_simulator_core_rs::{Fleet, FleetConfig, InMemoryRegistry};
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::driver::{ReportOptions, TickDriver};

/// Seed used when neither the config nor `--seed` supplies one
const DEFAULT_SEED: u64 = 12345;

#[derive(Debug, Parser)]
#[command(
    name = "spa-sim",
    author,
    version,
    about = "Simulate a fleet of spa and cooler appliances",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a fleet and tick it on a fixed cadence
    Run(RunArgs),
    /// Print the built-in sample fleet config as JSON
    Sample {
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Fleet config (JSON). Defaults to the built-in sample fleet.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks (runs until Ctrl+C when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Milliseconds between fleet ticks
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Power every device on before the first tick
    #[arg(long)]
    power_on: bool,

    /// Print a JSON snapshot to stdout after every tick
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Sample { seed } => {
            let json = serde_json::to_string_pretty(&FleetConfig::sample(seed))
                .context("serializing sample config")?;
            println!("{}", json);
            Ok(())
        }
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let mut registry = InMemoryRegistry::new();
    let mut fleet = Fleet::initialize(config, &mut registry).context("initializing fleet")?;

    for record in registry.records() {
        info!(id = %record.id, name = %record.display_name, connectable = record.connectable, "advertising");
    }

    if args.power_on {
        for id in fleet.device_ids() {
            fleet.require_device_mut(&id)?.power_on();
        }
    }

    let fleet = Arc::new(Mutex::new(fleet));
    let driver = TickDriver::spawn(
        Arc::clone(&fleet),
        Duration::from_millis(args.interval_ms.max(1)),
        args.ticks,
        ReportOptions { json: args.json },
    );

    let ticks = driver.join_or_interrupt().await?;

    let mut fleet = fleet.lock().await;
    fleet.dispose();
    info!(
        ticks,
        global_ticks = fleet.global_tick_count(),
        seed = fleet.rng_seed(),
        "simulation finished"
    );

    Ok(())
}

/// Config file (or the sample fleet) with the `--seed` override applied
fn resolve_config(args: &RunArgs) -> Result<FleetConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FleetConfig::sample(DEFAULT_SEED),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    Ok(config)
}

fn load_config(path: &Path) -> Result<FleetConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    FleetConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
