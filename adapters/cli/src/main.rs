#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays TOTS levels headlessly.

mod config;
mod levels;
mod script;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tots_core::TITLE_PREFIX;
use tots_world::{World, WorldConfig};
use tracing_subscriber::EnvFilter;

use crate::{config::Config, levels::LevelCatalog, session::Session};

/// Command-line arguments for the TOTS player.
#[derive(Debug, Parser)]
#[command(name = "tots", about = "Slide through TOTS tile puzzles from the terminal")]
struct Args {
    /// Path to a `tots.toml` configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding `*.json` level files.
    #[arg(long, value_name = "DIR")]
    levels: Option<PathBuf>,
    /// Lists available levels and exits.
    #[arg(long)]
    list: bool,
    /// Name of the level to play.
    #[arg(long, default_value = "1")]
    level: String,
    /// Moves to feed, one per tick: `w a s d`, `^ v < >`, or `.` to wait.
    #[arg(long, value_name = "SCRIPT", default_value = "")]
    moves: String,
    /// Capacity of the movement queue.
    #[arg(long, value_name = "N")]
    queue_capacity: Option<usize>,
    /// Upper bound on simulated ticks.
    #[arg(long, value_name = "N")]
    max_ticks: Option<u64>,
    /// Emits per-tick diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the TOTS command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args)?;
    let catalog = LevelCatalog::scan(&config.levels_dir)?;

    if args.list {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let level = catalog.load(&args.level)?;
    let world = World::from_level(&level, WorldConfig::new(config.queue_capacity))
        .with_context(|| format!("level `{}` cannot be played", args.level))?;
    let steps = script::parse(&args.moves)?;

    let summary = Session::new(world).run(&steps, config.max_ticks);
    println!("{TITLE_PREFIX}Level {}", args.level);
    println!("{summary}");
    Ok(())
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &args.levels {
        config.levels_dir = dir.clone();
    }
    if let Some(capacity) = args.queue_capacity {
        config.queue_capacity = capacity;
    }
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = max_ticks;
    }
    config.validate()?;
    Ok(config)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
