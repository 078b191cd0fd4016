//! Test fixtures: a small deterministic league for integration testing

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use court_ratings::source::{BoxScoreRow, GameType, RosterRow};
use court_ratings::types::SeasonYear;

/// Team names ordered strongest first
pub const TEAMS: [&str; 4] = ["Aces", "Bolts", "Comets", "Drift"];

/// Minutes per rotation slot; sums to one full game
pub const ROTATION: [f64; 8] = [36.0, 34.0, 32.0, 30.0, 28.0, 30.0, 25.0, 25.0];

pub fn player_id(team: usize, slot: usize) -> String {
    format!("{}-{}", TEAMS[team].to_lowercase(), slot)
}

/// Stronger team (lower index) wins, except every fifth game is an upset
fn home_wins(home: usize, away: usize, game_number: usize) -> bool {
    let favourite_home = home < away;
    if game_number % 5 == 4 {
        !favourite_home
    } else {
        favourite_home
    }
}

fn push_game(
    rows: &mut Vec<BoxScoreRow>,
    season: SeasonYear,
    game_type: GameType,
    game_id: String,
    date: NaiveDate,
    home: usize,
    away: usize,
    home_win: bool,
) {
    // away rows first: ordered by home flag ascending
    for (team, is_home) in [(away, false), (home, true)] {
        for (slot, minutes) in ROTATION.iter().enumerate() {
            rows.push(BoxScoreRow {
                season,
                game_type,
                game_id: game_id.clone(),
                game_date: date,
                team_name: TEAMS[team].to_string(),
                is_home,
                team_won: is_home == home_win,
                player_id: player_id(team, slot),
                player_name: format!("{} Player {}", TEAMS[team], slot),
                minutes: *minutes,
            });
        }
    }
}

/// Double round robin played twice, one game per day from late October
pub fn regular_season_rows(season: SeasonYear) -> Vec<BoxScoreRow> {
    let mut rows = Vec::new();
    let opening = NaiveDate::from_ymd_opt(season, 10, 20).unwrap();
    let mut game_number = 0;

    for _round in 0..2 {
        for home in 0..TEAMS.len() {
            for away in 0..TEAMS.len() {
                if home == away {
                    continue;
                }
                let date = opening + Duration::days(game_number as i64);
                push_game(
                    &mut rows,
                    season,
                    GameType::Regular,
                    format!("{}R{:04}", season, game_number),
                    date,
                    home,
                    away,
                    home_wins(home, away, game_number),
                );
                game_number += 1;
            }
        }
    }
    rows
}

/// Two four-game semifinals followed by a four-game final
pub fn playoff_rows(season: SeasonYear) -> Vec<BoxScoreRow> {
    let mut rows = Vec::new();
    let opening = NaiveDate::from_ymd_opt(season + 1, 4, 20).unwrap();
    let series = [(0, 3), (1, 2), (0, 1)];
    let mut game_number = 0;

    for (high, low) in series {
        for game_in_series in 0..4 {
            let (home, away) = if game_in_series % 2 == 0 {
                (high, low)
            } else {
                (low, high)
            };
            let date = opening + Duration::days(game_number as i64);
            push_game(
                &mut rows,
                season,
                GameType::Playoffs,
                format!("{}P{:04}", season, game_number),
                date,
                home,
                away,
                home_wins(home, away, game_number),
            );
            game_number += 1;
        }
    }
    rows
}

/// All box-score rows for a span of seasons, in chronological order
pub fn league_rows(seasons: std::ops::RangeInclusive<SeasonYear>) -> Vec<BoxScoreRow> {
    let mut rows = Vec::new();
    for season in seasons {
        rows.extend(regular_season_rows(season));
        rows.extend(playoff_rows(season));
    }
    rows
}

pub fn roster_rows(seasons: std::ops::RangeInclusive<SeasonYear>) -> Vec<RosterRow> {
    let mut rows = Vec::new();
    for season in seasons {
        for team in 0..TEAMS.len() {
            for slot in 0..ROTATION.len() {
                rows.push(RosterRow {
                    season,
                    team_name: TEAMS[team].to_string(),
                    player_id: player_id(team, slot),
                    player_name: format!("{} Player {}", TEAMS[team], slot),
                });
            }
        }
    }
    rows
}
