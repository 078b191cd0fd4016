//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate, with a thiserror enum for the failures callers match on.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid outcome code {code}: expected 0 (draw), 1 (team one) or 2 (team two)")]
    InvalidOutcome { code: i64 },

    #[error("Lineup for {team} is empty")]
    EmptyLineup { team: String },

    #[error("Lineup for {team} has {players} players but {weights} weights")]
    WeightMismatch {
        team: String,
        players: usize,
        weights: usize,
    },

    #[error("Invalid weight {weight} in lineup for {team}")]
    InvalidWeight { team: String, weight: f64 },

    #[error("Weights for {team} sum to zero")]
    ZeroWeightSum { team: String },

    #[error("Game {game_id} is missing a home or away team")]
    IncompleteGame { game_id: String },

    #[error("Game {game_id} lists {found} on the side already held by {expected}")]
    ConflictingTeam {
        game_id: String,
        expected: String,
        found: String,
    },

    #[error("Rows for game {game_id} are not contiguous")]
    NonContiguousGame { game_id: String },

    #[error("Invalid season range {start}..={end}")]
    InvalidSeasonRange { start: i32, end: i32 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
