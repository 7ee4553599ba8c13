//! Spatial Games - CLI Entry Point
//!
//! Evolves a field of cooperators and defectors and draws the last two
//! generations as a PNG.

use clap::Parser;
use spatial_games::loader::load_field;
use spatial_games::render::{PngRenderer, Renderer};
use spatial_games::stats::TransitionCounts;
use spatial_games::{Config, Payoff, Simulation};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "spatial-games")]
#[command(version)]
#[command(about = "Spatial Prisoner's Dilemma: evolve a field of cooperators and defectors")]
struct Cli {
    /// File containing the initial arrangement of cells
    field_file: PathBuf,

    /// Reward for defecting against a cooperator (must be > 0)
    #[arg(allow_negative_numbers = true)]
    b: Payoff,

    /// Number of generations to evolve
    #[arg(allow_negative_numbers = true)]
    nsteps: u64,

    /// Output image (overrides render.output from the config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file (YAML), used if it exists
    #[arg(short, long, default_value = "spatial_games.yaml")]
    config: PathBuf,

    /// Write the stats history as JSON
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Quiet mode (no per-generation progress)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(Config::from_file(path)?)
    } else {
        Ok(Config::default())
    }
}

fn run(cli: Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    if cli.config.exists() {
        log::info!("Loaded config from: {}", cli.config.display());
    } else {
        log::debug!("Using default configuration");
    }

    let field = load_field(&cli.field_file)?;
    log::info!("Field dimensions are: {} by {}", field.rows(), field.cols());

    let stats_interval = config.logging.stats_interval;
    let mut sim = Simulation::with_stats_interval(field, cli.b, stats_interval);

    log::info!("Evolving {} generations with b = {}", cli.nsteps, cli.b);
    let start = Instant::now();

    for _ in 0..cli.nsteps {
        sim.step();

        if !cli.quiet && sim.generation() % stats_interval == 0 {
            log::info!("{}", sim.stats.summary());
        }
    }

    let elapsed = start.elapsed();
    log::info!(
        "Finished {} generations in {:.3}s ({} cooperators, {} defectors)",
        sim.generation(),
        elapsed.as_secs_f64(),
        sim.stats.cooperators,
        sim.stats.defectors
    );

    let history = std::mem::take(&mut sim.stats_history);
    let pair = sim.into_generations();

    let counts = TransitionCounts::from_pair(&pair);
    log::info!(
        "Last step: C->C {} | D->C {} | C->D {} | D->D {}",
        counts.stayed_cooperator,
        counts.became_cooperator,
        counts.became_defector,
        counts.stayed_defector
    );

    let output = cli.output.unwrap_or(config.render.output);
    let renderer = PngRenderer::new(config.render.cell_size, config.render.palette);
    renderer.render(&pair.penultimate, &pair.last, &output)?;

    if let Some(stats_path) = cli.stats {
        history.save(&stats_path)?;
        log::info!("Stats history: {}", stats_path.display());
    }

    Ok(())
}
