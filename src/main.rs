//! Fiefdom - headless driver
//!
//! Runs the engine for a fixed number of ticks at an optional real-time
//! cadence and prints a settlement summary. Scheduling lives here; the
//! engine itself only exposes the pure tick step.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fiefdom::core::types::ResourceKind;
use fiefdom::sim;
use fiefdom::{SimConfig, WorldState};

#[derive(Parser, Debug)]
#[command(name = "fiefdom", about = "Tick-driven settlement strategy engine")]
struct Args {
    /// World generation seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// TOML file overriding tuning constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds to sleep between ticks (0 = as fast as possible)
    #[arg(long, default_value_t = 0)]
    interval_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "fiefdom=info".into()))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    config.validate()?;

    let mut state = WorldState::new(args.seed);
    tracing::info!(seed = args.seed, ticks = args.ticks, "settlement founded");

    for _ in 0..args.ticks {
        let report = sim::tick(&mut state, &config);
        for event in &report.events {
            tracing::info!(?event, tick = state.tick, "event");
        }
        if args.interval_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(args.interval_ms));
        }
    }

    println!("=== settlement after {} ticks ===", state.tick);
    println!("population: {:.0}  happiness: {:.0}", state.population, state.happiness);
    println!("gold: {:.1}", state.ledger.gold());
    for kind in ResourceKind::TRADEABLE {
        let stock = state.ledger.get(kind);
        if stock > 0.0 {
            println!("{kind:?}: {stock:.1}");
        }
    }
    for neighbor in &state.neighbors {
        println!(
            "{}: {:?} (score {:.0}, power {:.0})",
            neighbor.name, neighbor.relation_status, neighbor.relation_score, neighbor.military_power
        );
    }

    Ok(())
}
