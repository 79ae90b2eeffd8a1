use pistonsim::config::SimConfig;
use pistonsim::driver::{Driver, Pacing};
use pistonsim::event_log::FileEventLog;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Headless driver: builds the scene, ticks it, and prints a summary.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML configuration; defaults reproduce the classic scene.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// RNG seed (overrides the configuration file).
    #[arg(short, long)]
    seed: Option<u64>,

    /// Lifecycle event log, appended to.
    #[arg(short, long, default_value = "update.txt")]
    log: PathBuf,

    /// Tick back to back instead of at the configured interval.
    #[arg(long)]
    unpaced: bool,

    /// Print the piston state every N ticks (0 = never).
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    let pacing = if args.unpaced {
        Pacing::Unpaced
    } else {
        Pacing::RealTime(cfg.tick_interval())
    };

    let mut driver =
        Driver::new(&cfg, FileEventLog::new(&args.log)).context("building the scene")?;
    let report_every = args.report_every;
    driver.run(args.frames, pacing, |frame| {
        if report_every > 0 && frame.tick % report_every == 0 {
            let p = &frame.piston;
            println!(
                "tick {:>6}  piston ({:8.3}, {:8.3})  v ({:+.4}, {:+.4})",
                frame.tick, p.position[0], p.position[1], p.velocity[0], p.velocity[1]
            );
        }
        true
    });

    let sim = driver.simulation();
    println!(
        "ran {} ticks: {} molecules, kinetic energy {:.4}, piston at ({:.3}, {:.3}), speed {:.4}",
        sim.tick_count(),
        sim.num_molecules(),
        sim.kinetic_energy(),
        sim.piston.r[0],
        sim.piston.r[1],
        sim.piston.speed()
    );
    Ok(())
}
