//! Minute-weighted skill rating engine
//!
//! This module provides the pairwise update engine, the contest models it
//! delegates to (TrueSkill by default, Weng-Lin as an alternative), the
//! per-run rating state and the team aggregator.

pub mod aggregator;
pub mod calculator;
pub mod engine;
pub mod storage;
pub mod trueskill;
pub mod weng_lin;

// Re-export commonly used types
pub use aggregator::{TeamAggregator, FULL_GAME_MINUTES};
pub use calculator::{ContestModel, NoOpContestModel};
pub use engine::{moment_match, normalize_weights, PairwiseUpdateEngine, UNCERTAINTY_FLOOR};
pub use storage::{PlayerRecord, RatingState};
pub use trueskill::{ExtendedTrueSkillConfig, TrueSkillModel};
pub use weng_lin::{ExtendedWengLinConfig, WengLinModel};
