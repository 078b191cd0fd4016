//! Main application configuration
//!
//! This module defines the primary configuration structures for a rating run,
//! including TOML file loading, environment variable overrides and validation.

use crate::config::rating::RatingConfig;
use crate::types::SeasonYear;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
    pub period: PeriodSettings,
    pub io: IoSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Which seasons to rate and how state flows between them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodSettings {
    /// First season start year to score
    pub start_season: SeasonYear,
    /// Last season start year to score (inclusive)
    pub end_season: SeasonYear,
    /// Number of preceding seasons' playoffs folded in before scoring
    pub playoff_prefix_seasons: u32,
    /// Seed each regular season from the playoff priming state
    pub share_priming_state: bool,
    /// Start each regular season from the previous season's final state
    pub carry_regular_season_state: bool,
}

/// Input and output locations for the batch binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoSettings {
    /// Box-score rows ordered by date, game id, then home flag
    pub box_scores_path: PathBuf,
    /// Season-end roster rows
    pub rosters_path: PathBuf,
    /// Directory the rating tables are written to
    pub output_dir: PathBuf,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "court-ratings".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for PeriodSettings {
    fn default() -> Self {
        Self {
            start_season: 2009,
            end_season: 2024,
            playoff_prefix_seasons: 5,
            share_priming_state: false,
            carry_regular_season_state: false,
        }
    }
}

impl Default for IoSettings {
    fn default() -> Self {
        Self {
            box_scores_path: PathBuf::from("data/box_scores.csv"),
            rosters_path: PathBuf::from("data/rosters.csv"),
            output_dir: PathBuf::from("output"),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| anyhow!("Invalid {} value: {}", key, value)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Some(name) = parse_env("SERVICE_NAME")? {
            self.service.name = name;
        }
        if let Some(log_level) = parse_env("LOG_LEVEL")? {
            self.service.log_level = log_level;
        }

        // Rating settings
        if let Some(model) = parse_env("CONTEST_MODEL")? {
            self.rating.contest_model = model;
        }
        if let Some(mean) = parse_env("INITIAL_MEAN")? {
            self.rating.initial_mean = mean;
        }
        if let Some(std_dev) = parse_env("INITIAL_STD_DEV")? {
            self.rating.initial_std_dev = std_dev;
        }
        if let Some(beta) = parse_env("RATING_BETA")? {
            self.rating.beta = Some(beta);
        }
        if let Some(dynamics) = parse_env("RATING_DYNAMICS")? {
            self.rating.dynamics = Some(dynamics);
        }
        if let Some(floor) = parse_env("UNCERTAINTY_FLOOR")? {
            self.rating.uncertainty_floor = floor;
        }
        if let Some(minutes) = parse_env("FULL_GAME_MINUTES")? {
            self.rating.full_game_minutes = minutes;
        }

        // Period settings
        if let Some(start) = parse_env("START_SEASON")? {
            self.period.start_season = start;
        }
        if let Some(end) = parse_env("END_SEASON")? {
            self.period.end_season = end;
        }
        if let Some(prefix) = parse_env("PLAYOFF_PREFIX_SEASONS")? {
            self.period.playoff_prefix_seasons = prefix;
        }
        if let Some(share) = parse_env("SHARE_PRIMING_STATE")? {
            self.period.share_priming_state = share;
        }
        if let Some(carry) = parse_env("CARRY_REGULAR_SEASON_STATE")? {
            self.period.carry_regular_season_state = carry;
        }

        // IO settings
        if let Some(path) = parse_env("BOX_SCORES_PATH")? {
            self.io.box_scores_path = path;
        }
        if let Some(path) = parse_env("ROSTERS_PATH")? {
            self.io.rosters_path = path;
        }
        if let Some(path) = parse_env("OUTPUT_DIR")? {
            self.io.output_dir = path;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.validate()?;

    if config.period.start_season > config.period.end_season {
        return Err(anyhow!(
            "Start season {} is after end season {}",
            config.period.start_season,
            config.period.end_season
        ));
    }

    if config.io.output_dir.as_os_str().is_empty() {
        return Err(anyhow!("Output directory cannot be empty"));
    }

    Ok(())
}
