//! Input side of the rating engine
//!
//! Flat box-score and roster rows, their assembly into games and teams,
//! and the `GameSource` seam the orchestrator pulls seasons through.

pub mod provider;
pub mod rows;

// Re-export commonly used types
pub use provider::{GameSource, InMemoryGameSource};
pub use rows::{
    assemble_rosters, read_box_scores, read_rosters, BoxScoreRow, GameAssembler, GameType,
    RosterRow, ScheduledGame,
};
