// main.rs - Headless Conway's Game of Life runner with row coroutines

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conway::{LifeConfig, Simulation, TickOutcome};

mod report;

#[derive(Parser, Debug)]
#[command(name = "conway_coro", about = "Run Conway's Game of Life without a window")]
struct Cli {
    /// TOML file with runner settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    size: Option<usize>,

    /// Built-in pattern placed in the middle of the grid
    #[arg(long, conflicts_with = "random")]
    pattern: Option<String>,

    /// Start from a random grid even if the config names a pattern
    #[arg(long)]
    random: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Fraction of cells alive in a random grid
    #[arg(long)]
    density: Option<f64>,

    /// Maximum number of generations to run
    #[arg(short, long)]
    generations: Option<u64>,

    /// Compute each generation with one task per row
    #[arg(long)]
    concurrent: bool,

    /// Print the built-in patterns and exit
    #[arg(long)]
    list_patterns: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_patterns {
        report::print_patterns();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => LifeConfig::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => LifeConfig::default(),
    };
    let config = apply_overrides(&cli, config);
    config.validate()?;
    info!(size = config.grid_size, generations = config.generations, "configuration loaded");

    let mut simulation = Simulation::from_config(&config)?;
    match config.pattern.as_deref() {
        Some(name) => simulation
            .apply_pattern(name)
            .with_context(|| format!("placing pattern {name}"))?,
        None => {
            let seed = config.seed.unwrap_or_else(clock_seed);
            info!(seed, "seeding random grid");
            simulation.randomize(seed, config.random_density)?;
        }
    }

    run(&mut simulation, &config).await?;
    report::print_summary(&simulation);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags win over file values.
fn apply_overrides(cli: &Cli, mut config: LifeConfig) -> LifeConfig {
    if let Some(size) = cli.size {
        config.grid_size = size;
    }
    if let Some(generations) = cli.generations {
        config.generations = generations;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(density) = cli.density {
        config.random_density = density;
    }
    if cli.pattern.is_some() {
        config.pattern = cli.pattern.clone();
    }
    if cli.random {
        config.pattern = None;
    }
    config.concurrent |= cli.concurrent;
    config
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Ticks until the generation budget is spent or a cycle stops the run.
async fn run(simulation: &mut Simulation, config: &LifeConfig) -> Result<()> {
    simulation.start();
    while simulation.generation() < config.generations {
        let outcome = if config.concurrent {
            simulation.tick_concurrent().await?
        } else {
            simulation.tick()
        };
        if outcome == TickOutcome::Idle {
            break;
        }
    }
    simulation.stop();
    Ok(())
}
