//! Playoff series context
//!
//! Labels each playoff game with its result and with the head-to-head
//! standing of the two teams before the game. Only earlier games of the
//! same season count towards a standing.

use crate::types::{Game, PlayoffGameRow, SeasonYear};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Head-to-head record of one pairing, from team_a's side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRecord {
    pub team_a_wins: u32,
    pub team_b_wins: u32,
}

impl SeriesRecord {
    pub fn games_played(&self) -> u32 {
        self.team_a_wins + self.team_b_wins
    }

    pub fn diff(&self) -> i32 {
        self.team_a_wins as i32 - self.team_b_wins as i32
    }

    fn record(&mut self, team_a_won: bool) {
        if team_a_won {
            self.team_a_wins += 1;
        } else {
            self.team_b_wins += 1;
        }
    }
}

/// Running series records for one season's playoff stream
#[derive(Debug, Default)]
pub struct SeriesTracker {
    season: SeasonYear,
    records: HashMap<(String, String), SeriesRecord>,
}

impl SeriesTracker {
    pub fn new(season: SeasonYear) -> Self {
        Self {
            season,
            records: HashMap::new(),
        }
    }

    /// Standing between two teams so far, keyed in (team_a, team_b) order
    pub fn record(&self, team_a: &str, team_b: &str) -> SeriesRecord {
        self.records
            .get(&(team_a.to_string(), team_b.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Describe `game` with the standing before it, then count its result
    pub fn observe(&mut self, game: &Game) -> PlayoffGameRow {
        let (team_a, team_b) = game.ordered_teams();
        let team_a_win = game.team_a_won();

        let record = self
            .records
            .entry((team_a.name.clone(), team_b.name.clone()))
            .or_default();

        let row = PlayoffGameRow {
            season_start_year: self.season,
            game_id: game.id.clone(),
            game_date: game.date,
            team_a_name: team_a.name.clone(),
            team_b_name: team_b.name.clone(),
            team_a_home: game.team_a_is_home(),
            series_game_number: record.games_played() + 1,
            team_a_series_wins: record.team_a_wins,
            team_b_series_wins: record.team_b_wins,
            series_diff: record.diff(),
            team_a_win,
        };

        record.record(team_a_win);
        row
    }
}

/// Series rows for one season's playoff games, in input order
pub fn playoff_game_rows(season: SeasonYear, games: &[Game]) -> Vec<PlayoffGameRow> {
    let mut tracker = SeriesTracker::new(season);
    let rows: Vec<PlayoffGameRow> = games.iter().map(|game| tracker.observe(game)).collect();

    debug!(
        "Season {}: {} playoff games across {} series",
        season,
        rows.len(),
        tracker.records.len()
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Team;
    use chrono::NaiveDate;

    fn game(id: &str, day: u32, home: &str, away: &str, home_win: bool) -> Game {
        Game {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2022, 5, day).unwrap(),
            home: Team::new(home, Vec::new()),
            away: Team::new(away, Vec::new()),
            home_win,
        }
    }

    #[test]
    fn test_standing_counts_only_earlier_games() {
        let games = vec![
            game("g1", 1, "Celtics", "Warriors", true),
            game("g2", 2, "Celtics", "Warriors", false),
            game("g3", 3, "Warriors", "Celtics", false),
            game("g4", 4, "Warriors", "Celtics", true),
        ];

        let rows = playoff_game_rows(2021, &games);

        // Warriors sort after Celtics, so they are team_a throughout
        assert!(rows.iter().all(|r| r.team_a_name == "Warriors"));

        assert_eq!(rows[0].series_game_number, 1);
        assert_eq!((rows[0].team_a_series_wins, rows[0].team_b_series_wins), (0, 0));
        assert!(!rows[0].team_a_win);
        assert!(!rows[0].team_a_home);

        assert_eq!(rows[1].series_game_number, 2);
        assert_eq!((rows[1].team_a_series_wins, rows[1].team_b_series_wins), (0, 1));
        assert_eq!(rows[1].series_diff, -1);
        assert!(rows[1].team_a_win);

        assert_eq!(rows[2].series_game_number, 3);
        assert_eq!((rows[2].team_a_series_wins, rows[2].team_b_series_wins), (1, 1));
        assert!(rows[2].team_a_home);
        assert!(!rows[2].team_a_win);

        assert_eq!((rows[3].team_a_series_wins, rows[3].team_b_series_wins), (1, 2));
        assert_eq!(rows[3].series_diff, -1);
        assert!(rows[3].team_a_win);
        assert!(rows.iter().all(|r| r.season_start_year == 2021));
    }

    #[test]
    fn test_pairings_tracked_separately() {
        let mut tracker = SeriesTracker::new(2021);
        tracker.observe(&game("g1", 1, "Heat", "Hawks", true));
        tracker.observe(&game("g2", 2, "Suns", "Pelicans", true));
        let row = tracker.observe(&game("g3", 3, "Heat", "Hawks", true));

        assert_eq!(row.series_game_number, 2);
        assert_eq!(row.team_a_series_wins, 1);
        assert_eq!(row.series_diff, 1);
        assert_eq!(tracker.record("Suns", "Pelicans").games_played(), 1);
        assert_eq!(tracker.record("Knicks", "Nets"), SeriesRecord::default());
    }

    #[test]
    fn test_flipped_result_only_changes_later_standings() {
        let games = vec![
            game("g1", 1, "Heat", "Hawks", true),
            game("g2", 2, "Hawks", "Heat", true),
            game("g3", 3, "Heat", "Hawks", true),
        ];
        let mut flipped = games.clone();
        flipped[1].home_win = false;

        let original = playoff_game_rows(2021, &games);
        let changed = playoff_game_rows(2021, &flipped);

        assert_eq!(original[0], changed[0]);
        assert_eq!(original[1].team_a_series_wins, changed[1].team_a_series_wins);
        assert_eq!(original[1].team_b_series_wins, changed[1].team_b_series_wins);
        assert_ne!(original[1].team_a_win, changed[1].team_a_win);
        assert_ne!(original[2].series_diff, changed[2].series_diff);
    }
}
