//! Cardboard monkey terminal demo
//!
//! Controls (simulating the viewer):
//! - WASD or arrows: Turn head (Shift for bigger steps)
//! - Space or Enter: Pull the magnet trigger
//! - R: Look straight ahead again
//! - Q or Esc: Quit
//!
//! Usage:
//!   monkey-demo                    # Interactive, random placements
//!   monkey-demo --seed 42          # Interactive, reproducible placements
//!   monkey-demo --autopilot 20     # Headless, 20 scripted rounds

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cardboard_monkey::{RandomSource, RngSource};
use cardboard_monkey_app::{load_config, run_autopilot, run_interactive};

#[derive(Debug, Parser)]
#[command(name = "monkey-demo", version, about = "Find the spinning cube in stereo")]
struct Args {
    /// Scene config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Play this many rounds headless instead of opening the terminal UI
    #[arg(long, value_name = "ROUNDS")]
    autopilot: Option<u32>,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Write logs here in interactive mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging(args: &Args) -> Result<()> {
    if args.autopilot.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    } else if let Some(path) = &args.log_file {
        // The terminal UI owns stdout and stderr
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn run<R: RandomSource>(args: &Args, rng: R) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if let Some(rounds) = args.autopilot {
        let report = run_autopilot(config, rng, rounds);
        println!(
            "Autopilot: {} rounds, {} found, final score {}",
            report.rounds, report.found, report.score
        );
        return Ok(());
    }

    let score = run_interactive(config, rng, Duration::from_millis(args.tick_ms))?;
    println!("Final score: {}", score);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    match args.seed {
        Some(seed) => run(&args, RngSource::seeded(seed)),
        None => run(&args, RngSource::from_entropy()),
    }
}
