//! Team rating aggregation
//!
//! Collapses a roster's player beliefs into one team belief, weighting each
//! player by their average minutes across every game folded so far.

use crate::rating::engine::moment_match;
use crate::rating::storage::RatingState;
use crate::types::{SkillBelief, Team, TeamRating};
use serde::{Deserialize, Serialize};

/// Person-minutes in one full game: five players times 48 minutes
pub const FULL_GAME_MINUTES: f64 = 240.0;

/// Aggregates rostered players into a team-level belief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAggregator {
    /// Belief assigned to the synthetic filler player
    pub prior: SkillBelief,
    /// Weight total below which the filler player is added
    pub full_game_minutes: f64,
}

impl Default for TeamAggregator {
    fn default() -> Self {
        Self::new(SkillBelief::default(), FULL_GAME_MINUTES)
    }
}

impl TeamAggregator {
    pub fn new(prior: SkillBelief, full_game_minutes: f64) -> Self {
        Self {
            prior,
            full_game_minutes,
        }
    }

    /// Current team-level belief for `team`
    ///
    /// Players with no recorded minutes are skipped. When the rostered
    /// players' average minutes fall short of a full game, a prior player
    /// fills the gap so thinly observed rosters regress to the prior.
    pub fn team_rating(&self, state: &RatingState, team: &Team) -> TeamRating {
        let (mut beliefs, mut weights) = self.observed(state, team);

        let observed_minutes: f64 = weights.iter().sum();
        if observed_minutes < self.full_game_minutes {
            beliefs.push(self.prior);
            weights.push(self.full_game_minutes - observed_minutes);
        }

        let scaled: Vec<f64> = weights
            .iter()
            .map(|w| w / self.full_game_minutes)
            .collect();
        moment_match(&beliefs, &scaled)
    }

    /// Sum of average minutes for the rostered players found in state
    pub fn observed_minutes(&self, state: &RatingState, team: &Team) -> f64 {
        self.observed(state, team).1.iter().sum()
    }

    fn observed(&self, state: &RatingState, team: &Team) -> (Vec<SkillBelief>, Vec<f64>) {
        team.players
            .iter()
            .filter_map(|player| {
                let record = state.get(&player.id)?;
                let average = record.average_minutes()?;
                Some((record.belief, average))
            })
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    fn roster(ids: &[&str]) -> Team {
        Team::new(
            "Roster",
            ids.iter().map(|id| Player::new(*id, *id, 0.0)).collect(),
        )
    }

    fn seed(state: &mut RatingState, id: &str, belief: SkillBelief, minutes: &[f64]) {
        let record = state.get_or_insert_default(id, SkillBelief::default());
        for m in minutes {
            record.record_game(belief, *m);
        }
    }

    #[test]
    fn test_empty_state_gives_prior() {
        let aggregator = TeamAggregator::default();
        let rating = aggregator.team_rating(&RatingState::new(), &roster(&["a", "b"]));

        assert!((rating.mean - 25.0).abs() < 1e-12);
        assert!((rating.variance - SkillBelief::default().variance()).abs() < 1e-9);
    }

    #[test]
    fn test_single_ten_minute_player_gets_filler() {
        let aggregator = TeamAggregator::default();
        let mut state = RatingState::new();
        let real = SkillBelief::new(40.0, 2.0);
        seed(&mut state, "a", real, &[5.0, 15.0]);

        let rating = aggregator.team_rating(&state, &roster(&["a"]));

        let w_real: f64 = 10.0 / 240.0;
        let w_prior: f64 = 230.0 / 240.0;
        assert!((w_prior - 0.958).abs() < 1e-3);
        let expected_mean = w_prior * 25.0 + w_real * 40.0;
        let expected_var =
            w_prior * w_prior * SkillBelief::default().variance() + w_real * w_real * 4.0;
        assert!((rating.mean - expected_mean).abs() < 1e-9);
        assert!((rating.variance - expected_var).abs() < 1e-9);
    }

    #[test]
    fn test_full_rotation_unaffected_by_fallback() {
        let aggregator = TeamAggregator::default();
        let mut state = RatingState::new();
        let ids = ["a", "b", "c", "d", "e"];
        for id in ids {
            seed(&mut state, id, SkillBelief::new(30.0, 3.0), &[48.0]);
        }

        let rating = aggregator.team_rating(&state, &roster(&ids));
        assert_eq!(aggregator.observed_minutes(&state, &roster(&ids)), 240.0);
        assert!((rating.mean - 30.0).abs() < 1e-9);
        // five players at weight 0.2 each
        assert!((rating.variance - 5.0 * 0.04 * 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_shortfall_pulls_toward_prior() {
        let aggregator = TeamAggregator::default();
        let strong = SkillBelief::new(35.0, 3.0);

        let mut thin = RatingState::new();
        seed(&mut thin, "a", strong, &[60.0]);
        seed(&mut thin, "b", strong, &[60.0]);

        let mut deep = thin.clone();
        seed(&mut deep, "c", strong, &[120.0]);

        let thin_rating = aggregator.team_rating(&thin, &roster(&["a", "b", "c"]));
        let deep_rating = aggregator.team_rating(&deep, &roster(&["a", "b", "c"]));

        // 120 of 240 minutes observed: halfway between prior and player skill
        assert!((thin_rating.mean - 30.0).abs() < 1e-9);
        assert!((deep_rating.mean - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_players_are_skipped() {
        let aggregator = TeamAggregator::default();
        let mut state = RatingState::new();
        seed(&mut state, "a", SkillBelief::new(30.0, 3.0), &[48.0]);
        // seeded but never played
        state.get_or_insert_default("b", SkillBelief::new(99.0, 1.0));

        let with_ghosts = aggregator.team_rating(&state, &roster(&["a", "b", "zzz"]));
        let alone = aggregator.team_rating(&state, &roster(&["a"]));
        assert_eq!(with_ghosts, alone);
    }
}
