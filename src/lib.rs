//! Court Ratings - minute-weighted skill ratings for team sports
//!
//! This crate estimates individual player skill from team game outcomes,
//! weighting each player by minutes played, and derives team ratings as
//! leakage-free features: one snapshot per team per season and one pregame
//! rating pair per playoff game.

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod rating;
pub mod source;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use pipeline::{MultiSeasonOrchestrator, RatingTables, SeasonRatingPipeline};
pub use rating::{PairwiseUpdateEngine, RatingState, TeamAggregator};
pub use source::{GameSource, InMemoryGameSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
