//! Single-stream rating pipeline
//!
//! Folds one chronologically ordered game stream into a `RatingState`. Each
//! game goes through two explicit phases: `snapshot` reads the current team
//! ratings, then `apply` folds the game's result into state. Pregame rows
//! are always taken before the game they describe is applied.

use crate::config::RatingConfig;
use crate::error::Result;
use crate::rating::aggregator::TeamAggregator;
use crate::rating::engine::PairwiseUpdateEngine;
use crate::rating::storage::RatingState;
use crate::types::{Game, PregameRatingRow, SeasonRatingRow, SeasonYear, SkillBelief, Team};
use anyhow::Context;
use tracing::{debug, info, warn};

/// Drives the update engine and aggregator across one game stream
#[derive(Debug, Default)]
pub struct SeasonRatingPipeline {
    engine: PairwiseUpdateEngine,
    aggregator: TeamAggregator,
}

impl SeasonRatingPipeline {
    pub fn new(engine: PairwiseUpdateEngine, aggregator: TeamAggregator) -> Self {
        Self { engine, aggregator }
    }

    pub fn from_config(config: &RatingConfig) -> Result<Self> {
        let engine = PairwiseUpdateEngine::from_config(config)?;
        let aggregator = TeamAggregator::new(config.prior(), config.full_game_minutes);
        Ok(Self::new(engine, aggregator))
    }

    pub fn engine(&self) -> &PairwiseUpdateEngine {
        &self.engine
    }

    pub fn aggregator(&self) -> &TeamAggregator {
        &self.aggregator
    }

    /// Team ratings for `game` as they stand in `state`, before the game is applied
    pub fn snapshot(
        &self,
        state: &RatingState,
        season: SeasonYear,
        game: &Game,
    ) -> PregameRatingRow {
        let home = self.aggregator.team_rating(state, &game.home);
        let away = self.aggregator.team_rating(state, &game.away);

        let team_a_home = game.team_a_is_home();
        let ((team_a, rating_a), (team_b, rating_b)) = if team_a_home {
            ((&game.home, home), (&game.away, away))
        } else {
            ((&game.away, away), (&game.home, home))
        };

        PregameRatingRow {
            season_start_year: season,
            game_id: game.id.clone(),
            game_date: game.date,
            team_a_name: team_a.name.clone(),
            team_b_name: team_b.name.clone(),
            team_a_po_rating: rating_a.mean,
            team_a_po_rating_var: rating_a.variance,
            team_b_po_rating: rating_b.mean,
            team_b_po_rating_var: rating_b.variance,
            team_a_home,
        }
    }

    /// Fold one game's result into `state`
    ///
    /// Players weigh in with this game's minutes; afterwards every player's
    /// belief is replaced and the game's minutes appended to their history.
    pub fn apply(&self, state: &mut RatingState, game: &Game) -> Result<()> {
        if !state.accepts(game.date) {
            warn!(
                "Game {} on {} is earlier than the last rated game ({:?})",
                game.id,
                game.date,
                state.last_game_date()
            );
            debug_assert!(false, "games must be applied in chronological order");
        }

        let prior = self.engine.initial_belief();
        let home_beliefs = current_beliefs(state, &game.home, prior);
        let away_beliefs = current_beliefs(state, &game.away, prior);

        // state is only touched once the update has succeeded

        let (new_home, new_away) = self
            .engine
            .update(
                &home_beliefs,
                &away_beliefs,
                &game.home.minutes(),
                &game.away.minutes(),
                game.outcome(),
            )
            .with_context(|| format!("Failed to rate game {}", game.id))?;

        record(state, &game.home, &new_home, prior);
        record(state, &game.away, &new_away, prior);
        state.advance_to(game.date);

        debug!(
            "Applied game {} ({} vs {}, home win: {})",
            game.id, game.home.name, game.away.name, game.home_win
        );
        Ok(())
    }

    /// Fold games into state without capturing any output
    pub fn prime(&self, mut state: RatingState, games: &[Game]) -> Result<RatingState> {
        for game in games {
            self.apply(&mut state, game)?;
        }
        Ok(state)
    }

    /// Rate a season, then report every end-of-season roster team
    pub fn season_ratings(
        &self,
        state: RatingState,
        season: SeasonYear,
        games: &[Game],
        rosters: &[Team],
    ) -> Result<(Vec<SeasonRatingRow>, RatingState)> {
        let state = self.prime(state, games)?;

        let rows: Vec<SeasonRatingRow> = rosters
            .iter()
            .map(|team| {
                let rating = self.aggregator.team_rating(&state, team);
                SeasonRatingRow {
                    season_start_year: season,
                    team_name: team.name.clone(),
                    rating_mean: rating.mean,
                    rating_var: rating.variance,
                }
            })
            .collect();

        info!(
            "Season {}: rated {} games, {} teams, {} players tracked",
            season,
            games.len(),
            rows.len(),
            state.len()
        );
        Ok((rows, state))
    }

    /// Rate a stream, capturing each game's pregame ratings before applying it
    pub fn pregame_ratings(
        &self,
        mut state: RatingState,
        season: SeasonYear,
        games: &[Game],
    ) -> Result<(Vec<PregameRatingRow>, RatingState)> {
        let mut rows = Vec::with_capacity(games.len());
        for game in games {
            rows.push(self.snapshot(&state, season, game));
            self.apply(&mut state, game)?;
        }

        info!(
            "Season {}: captured {} pregame snapshots",
            season,
            rows.len()
        );
        Ok((rows, state))
    }
}

fn current_beliefs(state: &RatingState, team: &Team, prior: SkillBelief) -> Vec<SkillBelief> {
    team.players
        .iter()
        .map(|player| state.get(&player.id).map_or(prior, |record| record.belief))
        .collect()
}

fn record(state: &mut RatingState, team: &Team, beliefs: &[SkillBelief], prior: SkillBelief) {
    for (player, belief) in team.players.iter().zip(beliefs) {
        state
            .get_or_insert_default(&player.id, prior)
            .record_game(*belief, player.minutes);
    }
}
