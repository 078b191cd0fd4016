//! Multi-season orchestration
//!
//! Runs the season pipeline over a range of seasons. Regular-season tables
//! are produced per season; playoff pregame tables are produced from a single
//! state that is first primed with a window of preceding playoff seasons and
//! then threaded through every scored season in order. Playoff games are
//! also labelled with their result and series standing.

use crate::config::PeriodSettings;
use crate::error::{RatingError, Result};
use crate::pipeline::season::SeasonRatingPipeline;
use crate::pipeline::series::playoff_game_rows;
use crate::rating::storage::RatingState;
use crate::source::GameSource;
use crate::types::{PlayoffGameRow, PregameRatingRow, SeasonRatingRow, SeasonYear};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::info;

/// How state flows between the streams of a multi-season run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorSettings {
    /// Preceding playoff seasons folded in before the first scored season
    pub playoff_prefix_seasons: u32,
    /// Seed each regular season from the playoff priming state instead of empty state
    pub share_priming_state: bool,
    /// Start each regular season from the previous season's final state
    pub carry_regular_season_state: bool,
}

impl From<&PeriodSettings> for OrchestratorSettings {
    fn from(period: &PeriodSettings) -> Self {
        Self {
            playoff_prefix_seasons: period.playoff_prefix_seasons,
            share_priming_state: period.share_priming_state,
            carry_regular_season_state: period.carry_regular_season_state,
        }
    }
}

/// Output tables of a multi-season run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingTables {
    pub season_ratings: Vec<SeasonRatingRow>,
    pub pregame_ratings: Vec<PregameRatingRow>,
    pub playoff_games: Vec<PlayoffGameRow>,
}

/// Loops the season pipeline over a season range
pub struct MultiSeasonOrchestrator {
    pipeline: SeasonRatingPipeline,
    source: Arc<dyn GameSource>,
    settings: OrchestratorSettings,
}

impl MultiSeasonOrchestrator {
    pub fn new(
        pipeline: SeasonRatingPipeline,
        source: Arc<dyn GameSource>,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            pipeline,
            source,
            settings,
        }
    }

    /// Produce both tables for `seasons`, priming only once
    pub fn run(&self, seasons: RangeInclusive<SeasonYear>) -> Result<RatingTables> {
        check_range(&seasons)?;

        let primed = self.prime_playoffs(*seasons.start(), self.settings.playoff_prefix_seasons)?;
        let seed = if self.settings.share_priming_state {
            primed.clone()
        } else {
            RatingState::new()
        };

        let pregame_ratings = self.score_playoffs(seasons.clone(), primed)?;
        let playoff_games = self.playoff_game_period(seasons.clone())?;
        let season_ratings = self.score_regular_seasons(seasons, seed)?;

        Ok(RatingTables {
            season_ratings,
            pregame_ratings,
            playoff_games,
        })
    }

    /// End-of-season team ratings for every season in range
    pub fn regular_season_period(
        &self,
        seasons: RangeInclusive<SeasonYear>,
    ) -> Result<Vec<SeasonRatingRow>> {
        check_range(&seasons)?;

        let seed = if self.settings.share_priming_state {
            self.prime_playoffs(*seasons.start(), self.settings.playoff_prefix_seasons)?
        } else {
            RatingState::new()
        };
        self.score_regular_seasons(seasons, seed)
    }

    /// Pregame playoff ratings for every season in range, primed with
    /// `prefix_seasons` preceding playoff seasons
    pub fn playoff_pregame_period(
        &self,
        seasons: RangeInclusive<SeasonYear>,
        prefix_seasons: u32,
    ) -> Result<Vec<PregameRatingRow>> {
        check_range(&seasons)?;

        let primed = self.prime_playoffs(*seasons.start(), prefix_seasons)?;
        self.score_playoffs(seasons, primed)
    }

    /// Result and series standing of every playoff game in range
    pub fn playoff_game_period(
        &self,
        seasons: RangeInclusive<SeasonYear>,
    ) -> Result<Vec<PlayoffGameRow>> {
        check_range(&seasons)?;

        let mut table = Vec::new();
        for season in seasons {
            let games = self.source.playoff_games(season)?;
            table.extend(playoff_game_rows(season, &games));
        }
        Ok(table)
    }

    /// Fold the playoff seasons immediately before `first_scored` into fresh state
    pub fn prime_playoffs(
        &self,
        first_scored: SeasonYear,
        prefix_seasons: u32,
    ) -> Result<RatingState> {
        let first_primed = first_scored - prefix_seasons as SeasonYear;
        let mut state = RatingState::new();
        let mut games_folded = 0;

        for season in first_primed..first_scored {
            let games = self.source.playoff_games(season)?;
            games_folded += games.len();
            state = self.pipeline.prime(state, &games)?;
        }

        info!(
            "Primed playoff state with seasons {}..{}: {} games, {} players",
            first_primed,
            first_scored,
            games_folded,
            state.len()
        );
        Ok(state)
    }

    fn score_playoffs(
        &self,
        seasons: RangeInclusive<SeasonYear>,
        mut state: RatingState,
    ) -> Result<Vec<PregameRatingRow>> {
        let mut table = Vec::new();
        for season in seasons {
            let games = self.source.playoff_games(season)?;
            let (rows, next) = self.pipeline.pregame_ratings(state, season, &games)?;
            table.extend(rows);
            state = next;
        }
        Ok(table)
    }

    fn score_regular_seasons(
        &self,
        seasons: RangeInclusive<SeasonYear>,
        seed: RatingState,
    ) -> Result<Vec<SeasonRatingRow>> {
        let mut table = Vec::new();
        let mut carried = seed.clone();

        for season in seasons {
            let start = if self.settings.carry_regular_season_state {
                std::mem::take(&mut carried)
            } else {
                seed.clone()
            };

            let games = self.source.regular_season_games(season)?;
            let rosters = self.source.season_end_rosters(season)?;
            let (rows, end) = self.pipeline.season_ratings(start, season, &games, &rosters)?;
            table.extend(rows);
            carried = end;
        }
        Ok(table)
    }
}

fn check_range(seasons: &RangeInclusive<SeasonYear>) -> Result<()> {
    if seasons.start() > seasons.end() {
        return Err(RatingError::InvalidSeasonRange {
            start: *seasons.start(),
            end: *seasons.end(),
        }
        .into());
    }
    Ok(())
}
