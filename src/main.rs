//! Main entry point for the court-ratings batch job
//!
//! Loads box scores and season-end rosters, runs the multi-season rating
//! orchestration and writes the season, pregame and feature tables as CSV.

use anyhow::{Context, Result};
use clap::Parser;
use court_ratings::config::{validate_config, AppConfig};
use court_ratings::export::write_tables;
use court_ratings::pipeline::{MultiSeasonOrchestrator, OrchestratorSettings, SeasonRatingPipeline};
use court_ratings::source::{read_box_scores, read_rosters, InMemoryGameSource};
use court_ratings::VERSION;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Court Ratings - minute-weighted team rating features
#[derive(Parser)]
#[command(
    name = "court-ratings",
    version,
    about = "Minute-weighted player skill ratings and leakage-free team rating features",
    long_about = "Court Ratings folds box scores into per-player skill beliefs, weighting every \
                 player by minutes played, and emits end-of-season team ratings plus pregame \
                 playoff ratings primed with a window of earlier playoff seasons."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Box-score CSV override
    #[arg(long, value_name = "FILE", help = "Override box-score CSV path")]
    box_scores: Option<PathBuf>,

    /// Roster CSV override
    #[arg(long, value_name = "FILE", help = "Override season-end roster CSV path")]
    rosters: Option<PathBuf>,

    /// Output directory override
    #[arg(short, long, value_name = "DIR", help = "Override output directory")]
    output_dir: Option<PathBuf>,

    /// First season override
    #[arg(long, value_name = "YEAR", help = "First season start year to score")]
    start_season: Option<i32>,

    /// Last season override
    #[arg(long, value_name = "YEAR", help = "Last season start year to score")]
    end_season: Option<i32>,

    /// Playoff priming window override
    #[arg(
        long,
        value_name = "SEASONS",
        help = "Number of preceding playoff seasons used to prime ratings"
    )]
    prefix_seasons: Option<u32>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without rating")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if let Some(path) = &args.box_scores {
        config.io.box_scores_path = path.clone();
    }
    if let Some(path) = &args.rosters {
        config.io.rosters_path = path.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.io.output_dir = dir.clone();
    }
    if let Some(start) = args.start_season {
        config.period.start_season = start;
    }
    if let Some(end) = args.end_season {
        config.period.end_season = end;
    }
    if let Some(prefix) = args.prefix_seasons {
        config.period.playoff_prefix_seasons = prefix;
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display run banner with configuration summary
fn display_banner(config: &AppConfig) {
    info!("Court Ratings v{}", VERSION);
    info!("   Service: {}", config.service.name);
    info!(
        "   Seasons: {}..={}",
        config.period.start_season, config.period.end_season
    );
    info!(
        "   Playoff priming: {} seasons",
        config.period.playoff_prefix_seasons
    );
    info!("   Contest model: {:?}", config.rating.contest_model);
    info!("   Box scores: {}", config.io.box_scores_path.display());
    info!("   Rosters: {}", config.io.rosters_path.display());
    info!("   Output: {}", config.io.output_dir.display());
}

fn run(config: &AppConfig) -> Result<()> {
    let box_file = File::open(&config.io.box_scores_path)
        .with_context(|| format!("Failed to open {}", config.io.box_scores_path.display()))?;
    let roster_file = File::open(&config.io.rosters_path)
        .with_context(|| format!("Failed to open {}", config.io.rosters_path.display()))?;

    let box_scores = read_box_scores(box_file)?;
    let rosters = read_rosters(roster_file)?;
    info!(
        "Loaded {} box-score rows and {} roster rows",
        box_scores.len(),
        rosters.len()
    );

    let source = InMemoryGameSource::from_rows(box_scores, rosters)?;
    let pipeline = SeasonRatingPipeline::from_config(&config.rating)?;
    let model = pipeline.engine().model();
    info!("Contest model {}: {}", model.name(), model.config());
    let orchestrator = MultiSeasonOrchestrator::new(
        pipeline,
        Arc::new(source),
        OrchestratorSettings::from(&config.period),
    );

    let tables = orchestrator.run(config.period.start_season..=config.period.end_season)?;
    let written = write_tables(&config.io.output_dir, &tables)?;

    info!(
        "Done: {} season rows, {} pregame rows, {} files",
        tables.season_ratings.len(),
        tables.pregame_ratings.len(),
        written.len()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_banner(&config);

    if args.dry_run {
        info!("Dry run completed - configuration is valid");
        return Ok(());
    }

    if let Err(e) = run(&config) {
        error!("Rating run failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
