//! Feature table assembly and CSV emission
//!
//! Joins each labelled playoff game with its pregame playoff ratings and
//! both teams' regular-season ratings from the same season, and writes the
//! rating tables as CSV.

use crate::error::Result;
use crate::pipeline::RatingTables;
use crate::types::{GameId, PlayoffGameRow, PregameRatingRow, SeasonRatingRow, SeasonYear};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SEASON_RATINGS_FILE: &str = "regular_season_ratings.csv";
pub const PREGAME_RATINGS_FILE: &str = "playoff_pregame_ratings.csv";
pub const PLAYOFF_GAMES_FILE: &str = "playoff_game_metadata.csv";
pub const FEATURES_FILE: &str = "playoff_features.csv";

/// One labelled playoff game with its series standing, pregame playoff
/// ratings and both teams' regular-season ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffFeatureRow {
    pub season_start_year: SeasonYear,
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_home: bool,
    pub series_game_number: u32,
    pub team_a_series_wins: u32,
    pub team_b_series_wins: u32,
    pub series_diff: i32,
    pub team_a_win: bool,
    pub team_a_po_rating: Option<f64>,
    pub team_a_po_rating_var: Option<f64>,
    pub team_b_po_rating: Option<f64>,
    pub team_b_po_rating_var: Option<f64>,
    pub team_a_rs_rating: Option<f64>,
    pub team_a_rs_rating_var: Option<f64>,
    pub team_b_rs_rating: Option<f64>,
    pub team_b_rs_rating_var: Option<f64>,
}

/// Left-join playoff games with their pregame ratings and same-season
/// regular-season ratings
pub fn merge_features(
    games: &[PlayoffGameRow],
    pregame: &[PregameRatingRow],
    season_ratings: &[SeasonRatingRow],
) -> Vec<PlayoffFeatureRow> {
    let by_game: HashMap<(SeasonYear, &str), &PregameRatingRow> = pregame
        .iter()
        .map(|row| ((row.season_start_year, row.game_id.as_str()), row))
        .collect();
    let by_team: HashMap<(SeasonYear, &str), &SeasonRatingRow> = season_ratings
        .iter()
        .map(|row| ((row.season_start_year, row.team_name.as_str()), row))
        .collect();

    games
        .iter()
        .map(|row| {
            let po = by_game.get(&(row.season_start_year, row.game_id.as_str()));
            let team_a = by_team.get(&(row.season_start_year, row.team_a_name.as_str()));
            let team_b = by_team.get(&(row.season_start_year, row.team_b_name.as_str()));

            PlayoffFeatureRow {
                season_start_year: row.season_start_year,
                game_id: row.game_id.clone(),
                game_date: row.game_date,
                team_a_name: row.team_a_name.clone(),
                team_b_name: row.team_b_name.clone(),
                team_a_home: row.team_a_home,
                series_game_number: row.series_game_number,
                team_a_series_wins: row.team_a_series_wins,
                team_b_series_wins: row.team_b_series_wins,
                series_diff: row.series_diff,
                team_a_win: row.team_a_win,
                team_a_po_rating: po.map(|r| r.team_a_po_rating),
                team_a_po_rating_var: po.map(|r| r.team_a_po_rating_var),
                team_b_po_rating: po.map(|r| r.team_b_po_rating),
                team_b_po_rating_var: po.map(|r| r.team_b_po_rating_var),
                team_a_rs_rating: team_a.map(|r| r.rating_mean),
                team_a_rs_rating_var: team_a.map(|r| r.rating_var),
                team_b_rs_rating: team_b.map(|r| r.rating_mean),
                team_b_rs_rating_var: team_b.map(|r| r.rating_var),
            }
        })
        .collect()
}

/// Serialize rows as CSV with a header line
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn write_file<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_rows(file, rows).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write the season, pregame, playoff game and merged feature tables into
/// `output_dir`
pub fn write_tables(output_dir: &Path, tables: &RatingTables) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let features = merge_features(
        &tables.playoff_games,
        &tables.pregame_ratings,
        &tables.season_ratings,
    );

    let season_path = output_dir.join(SEASON_RATINGS_FILE);
    let pregame_path = output_dir.join(PREGAME_RATINGS_FILE);
    let games_path = output_dir.join(PLAYOFF_GAMES_FILE);
    let features_path = output_dir.join(FEATURES_FILE);

    write_file(&season_path, &tables.season_ratings)?;
    write_file(&pregame_path, &tables.pregame_ratings)?;
    write_file(&games_path, &tables.playoff_games)?;
    write_file(&features_path, &features)?;

    Ok(vec![season_path, pregame_path, games_path, features_path])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pregame(season: SeasonYear, a: &str, b: &str) -> PregameRatingRow {
        PregameRatingRow {
            season_start_year: season,
            game_id: format!("{}-{}-{}", season, a, b),
            game_date: NaiveDate::from_ymd_opt(season + 1, 5, 1).unwrap(),
            team_a_name: a.to_string(),
            team_b_name: b.to_string(),
            team_a_po_rating: 26.0,
            team_a_po_rating_var: 2.0,
            team_b_po_rating: 24.0,
            team_b_po_rating_var: 3.0,
            team_a_home: true,
        }
    }

    fn playoff_game(season: SeasonYear, a: &str, b: &str, number: u32) -> PlayoffGameRow {
        PlayoffGameRow {
            season_start_year: season,
            game_id: format!("{}-{}-{}", season, a, b),
            game_date: NaiveDate::from_ymd_opt(season + 1, 5, 1).unwrap(),
            team_a_name: a.to_string(),
            team_b_name: b.to_string(),
            team_a_home: true,
            series_game_number: number,
            team_a_series_wins: number - 1,
            team_b_series_wins: 0,
            series_diff: number as i32 - 1,
            team_a_win: true,
        }
    }

    fn season_row(season: SeasonYear, team: &str, mean: f64) -> SeasonRatingRow {
        SeasonRatingRow {
            season_start_year: season,
            team_name: team.to_string(),
            rating_mean: mean,
            rating_var: 1.5,
        }
    }

    #[test]
    fn test_merge_joins_on_season_and_team() {
        let game_rows = vec![
            playoff_game(2020, "Suns", "Bucks", 1),
            playoff_game(2021, "Suns", "Bucks", 3),
        ];
        let pregame_rows = vec![pregame(2020, "Suns", "Bucks"), pregame(2021, "Suns", "Bucks")];
        let season_rows = vec![
            season_row(2020, "Suns", 27.0),
            season_row(2020, "Bucks", 26.5),
            season_row(2021, "Suns", 23.0),
        ];

        let features = merge_features(&game_rows, &pregame_rows, &season_rows);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].team_a_rs_rating, Some(27.0));
        assert_eq!(features[0].team_b_rs_rating, Some(26.5));
        assert_eq!(features[0].team_a_po_rating, Some(26.0));
        assert!(features[0].team_a_win);
        assert_eq!(features[1].series_game_number, 3);
        assert_eq!(features[1].team_a_series_wins, 2);
        assert_eq!(features[1].series_diff, 2);
        assert_eq!(features[1].team_a_rs_rating, Some(23.0));
        assert_eq!(features[1].team_b_rs_rating, None);
        assert_eq!(features[1].team_b_rs_rating_var, None);
    }

    #[test]
    fn test_merge_keeps_games_without_pregame_ratings() {
        let game_rows = vec![playoff_game(2020, "Suns", "Bucks", 1)];
        let features = merge_features(&game_rows, &[pregame(2019, "Suns", "Bucks")], &[]);

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].team_a_po_rating, None);
        assert_eq!(features[0].team_b_po_rating_var, None);
    }

    #[test]
    fn test_write_rows_csv() {
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &[season_row(2020, "Suns", 27.0)]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("season_start_year,team_name,rating_mean,rating_var")
        );
        assert_eq!(lines.next(), Some("2020,Suns,27.0,1.5"));
    }

    #[test]
    fn test_missing_join_writes_empty_fields() {
        let features = merge_features(
            &[playoff_game(2020, "Suns", "Bucks", 1)],
            &[pregame(2020, "Suns", "Bucks")],
            &[],
        );
        let mut buffer = Vec::new();
        write_rows(&mut buffer, &features).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let data_line = text.lines().nth(1).unwrap();
        assert!(data_line.ends_with(",,,,"));
    }
}
