//! Chronological rating pipelines
//!
//! This module provides the single-stream season pipeline, playoff series
//! tracking and the multi-season orchestrator built on top of them.

pub mod orchestrator;
pub mod season;
pub mod series;

// Re-export commonly used types
pub use orchestrator::{MultiSeasonOrchestrator, OrchestratorSettings, RatingTables};
pub use season::SeasonRatingPipeline;
pub use series::{playoff_game_rows, SeriesRecord, SeriesTracker};
