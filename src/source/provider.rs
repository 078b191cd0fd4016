//! Game source trait and implementations
//!
//! The relational store and its extraction queries live outside this crate.
//! Whatever produces ordered games and season-end rosters plugs in behind
//! `GameSource`; `InMemoryGameSource` covers assembled CSV input and tests.

use crate::error::Result;
use crate::source::rows::{assemble_rosters, BoxScoreRow, GameAssembler, GameType, RosterRow};
use crate::types::{Game, SeasonYear, Team};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Trait for supplying ordered games and rosters per season
pub trait GameSource {
    /// Regular-season games for a season, in chronological order
    fn regular_season_games(&self, season: SeasonYear) -> Result<Vec<Game>>;

    /// Playoff games for a season, in chronological order
    fn playoff_games(&self, season: SeasonYear) -> Result<Vec<Game>>;

    /// Teams as they stood at the end of the regular season, players at zero minutes
    fn season_end_rosters(&self, season: SeasonYear) -> Result<Vec<Team>>;
}

/// Game source backed by vectors held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameSource {
    regular: HashMap<SeasonYear, Vec<Game>>,
    playoffs: HashMap<SeasonYear, Vec<Game>>,
    rosters: HashMap<SeasonYear, Vec<Team>>,
}

impl InMemoryGameSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from flat box-score and roster rows
    pub fn from_rows(
        box_scores: impl IntoIterator<Item = BoxScoreRow>,
        rosters: impl IntoIterator<Item = RosterRow>,
    ) -> Result<Self> {
        let mut source = Self::new();

        for scheduled in GameAssembler::assemble(box_scores)? {
            let bucket = match scheduled.game_type {
                GameType::Regular => &mut source.regular,
                GameType::Playoffs => &mut source.playoffs,
            };
            bucket
                .entry(scheduled.season)
                .or_default()
                .push(scheduled.game);
        }

        source.rosters.extend(assemble_rosters(rosters));
        Ok(source)
    }

    pub fn with_regular_season(mut self, season: SeasonYear, games: Vec<Game>) -> Self {
        self.regular.insert(season, games);
        self
    }

    pub fn with_playoffs(mut self, season: SeasonYear, games: Vec<Game>) -> Self {
        self.playoffs.insert(season, games);
        self
    }

    pub fn with_rosters(mut self, season: SeasonYear, teams: Vec<Team>) -> Self {
        self.rosters.insert(season, teams);
        self
    }

    /// Every season with at least one game or roster
    pub fn seasons(&self) -> BTreeSet<SeasonYear> {
        self.regular
            .keys()
            .chain(self.playoffs.keys())
            .chain(self.rosters.keys())
            .copied()
            .collect()
    }
}

fn season_or_empty<T: Clone>(
    map: &HashMap<SeasonYear, Vec<T>>,
    season: SeasonYear,
    what: &str,
) -> Vec<T> {
    match map.get(&season) {
        Some(items) => items.clone(),
        None => {
            debug!("No {} for season {}", what, season);
            Vec::new()
        }
    }
}

impl GameSource for InMemoryGameSource {
    fn regular_season_games(&self, season: SeasonYear) -> Result<Vec<Game>> {
        Ok(season_or_empty(&self.regular, season, "regular-season games"))
    }

    fn playoff_games(&self, season: SeasonYear) -> Result<Vec<Game>> {
        Ok(season_or_empty(&self.playoffs, season, "playoff games"))
    }

    fn season_end_rosters(&self, season: SeasonYear) -> Result<Vec<Team>> {
        Ok(season_or_empty(&self.rosters, season, "rosters"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(
        season: SeasonYear,
        game_type: GameType,
        game: &str,
        home: bool,
        player: &str,
    ) -> BoxScoreRow {
        BoxScoreRow {
            season,
            game_type,
            game_id: game.to_string(),
            game_date: NaiveDate::from_ymd_opt(season + 1, 3, 1).unwrap(),
            team_name: if home { "Home" } else { "Away" }.to_string(),
            is_home: home,
            team_won: home,
            player_id: player.to_string(),
            player_name: player.to_string(),
            minutes: 48.0,
        }
    }

    #[test]
    fn test_from_rows_buckets_by_season_and_type() {
        let rows = vec![
            row(2019, GameType::Regular, "r1", false, "a"),
            row(2019, GameType::Regular, "r1", true, "h"),
            row(2019, GameType::Playoffs, "p1", false, "a"),
            row(2019, GameType::Playoffs, "p1", true, "h"),
            row(2020, GameType::Regular, "r2", false, "a"),
            row(2020, GameType::Regular, "r2", true, "h"),
        ];
        let rosters = vec![RosterRow {
            season: 2019,
            team_name: "Home".to_string(),
            player_id: "h".to_string(),
            player_name: "h".to_string(),
        }];

        let source = InMemoryGameSource::from_rows(rows, rosters).unwrap();
        assert_eq!(source.regular_season_games(2019).unwrap().len(), 1);
        assert_eq!(source.playoff_games(2019).unwrap()[0].id, "p1");
        assert_eq!(source.regular_season_games(2020).unwrap()[0].id, "r2");
        assert!(source.playoff_games(2020).unwrap().is_empty());
        assert_eq!(source.season_end_rosters(2019).unwrap().len(), 1);
        assert_eq!(source.seasons().into_iter().collect::<Vec<_>>(), vec![2019, 2020]);
    }

    #[test]
    fn test_missing_season_is_empty() {
        let source = InMemoryGameSource::new();
        assert!(source.regular_season_games(1999).unwrap().is_empty());
        assert!(source.playoff_games(1999).unwrap().is_empty());
        assert!(source.season_end_rosters(1999).unwrap().is_empty());
    }
}
