//! Rating state for one pipeline run
//!
//! Maps each player to their current belief and the minutes they have played
//! in every game folded so far. The state is a plain owned value: a run
//! mutates it through `&mut`, and handing it to the next stage is a move.

use crate::types::{PlayerId, SkillBelief};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Storage entry for one player's rating with minutes history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub belief: SkillBelief,
    pub minutes_history: Vec<f64>,
}

impl PlayerRecord {
    /// Create a new record for a player who has not played yet
    pub fn new(belief: SkillBelief) -> Self {
        Self {
            belief,
            minutes_history: Vec::new(),
        }
    }

    /// Mean of every minutes value recorded so far
    pub fn average_minutes(&self) -> Option<f64> {
        if self.minutes_history.is_empty() {
            return None;
        }
        Some(self.minutes_history.iter().sum::<f64>() / self.minutes_history.len() as f64)
    }

    pub fn games_played(&self) -> usize {
        self.minutes_history.len()
    }

    /// Store the post-game belief and append the game's minutes
    pub fn record_game(&mut self, belief: SkillBelief, minutes: f64) {
        self.belief = belief;
        self.minutes_history.push(minutes);
    }
}

/// Player id to rating record mapping, updated in chronological game order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingState {
    records: HashMap<PlayerId, PlayerRecord>,
    last_game_date: Option<NaiveDate>,
}

impl RatingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, player_id: &str) -> Option<&PlayerRecord> {
        self.records.get(player_id)
    }

    /// Fetch a player's record, seeding it with `prior` on first access
    pub fn get_or_insert_default(
        &mut self,
        player_id: &str,
        prior: SkillBelief,
    ) -> &mut PlayerRecord {
        self.records
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerRecord::new(prior))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Date of the latest game folded into this state
    pub fn last_game_date(&self) -> Option<NaiveDate> {
        self.last_game_date
    }

    /// Whether a game on `date` keeps the stream chronological
    pub fn accepts(&self, date: NaiveDate) -> bool {
        self.last_game_date.map_or(true, |last| date >= last)
    }

    /// Advance the ordering watermark, returning false if `date` is earlier
    /// than a game already folded
    pub fn advance_to(&mut self, date: NaiveDate) -> bool {
        match self.last_game_date {
            Some(last) if date < last => false,
            _ => {
                self.last_game_date = Some(date);
                true
            }
        }
    }
}
