//! Flat box-score rows and their assembly into games
//!
//! Rows arrive ordered by game date, game id and home flag. Consecutive rows
//! sharing a game id form one game; within it the home flag splits the two
//! lineups.

use crate::error::{RatingError, Result};
use crate::types::{Game, GameId, Player, PlayerId, SeasonYear, Team};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use tracing::debug;

/// Part of the season a game belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[serde(alias = "Regular Season", alias = "regular")]
    Regular,
    #[serde(alias = "playoffs")]
    Playoffs,
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameType::Regular => write!(f, "Regular"),
            GameType::Playoffs => write!(f, "Playoffs"),
        }
    }
}

/// One player's line in one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxScoreRow {
    pub season: SeasonYear,
    pub game_type: GameType,
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub team_name: String,
    pub is_home: bool,
    pub team_won: bool,
    pub player_id: PlayerId,
    pub player_name: String,
    pub minutes: f64,
}

/// One player on a team's season-end roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    pub season: SeasonYear,
    pub team_name: String,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// A game tagged with the season and phase it was played in
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledGame {
    pub season: SeasonYear,
    pub game_type: GameType,
    pub game: Game,
}

#[derive(Debug)]
struct PartialGame {
    season: SeasonYear,
    game_type: GameType,
    id: GameId,
    date: NaiveDate,
    home: Option<Team>,
    away: Option<Team>,
    home_win: bool,
}

impl PartialGame {
    fn start(row: &BoxScoreRow) -> Self {
        Self {
            season: row.season,
            game_type: row.game_type,
            id: row.game_id.clone(),
            date: row.game_date,
            home: None,
            away: None,
            home_win: false,
        }
    }

    fn push(&mut self, row: BoxScoreRow) -> Result<()> {
        if row.is_home {
            self.home_win = row.team_won;
        }
        let side = if row.is_home {
            &mut self.home
        } else {
            &mut self.away
        };
        let team = side.get_or_insert_with(|| Team::new(row.team_name.clone(), Vec::new()));
        if team.name != row.team_name {
            return Err(RatingError::ConflictingTeam {
                game_id: self.id.clone(),
                expected: team.name.clone(),
                found: row.team_name,
            }
            .into());
        }
        team.players
            .push(Player::new(row.player_id, row.player_name, row.minutes));
        Ok(())
    }

    fn finish(self) -> Result<ScheduledGame> {
        match (self.home, self.away) {
            (Some(home), Some(away)) => Ok(ScheduledGame {
                season: self.season,
                game_type: self.game_type,
                game: Game {
                    id: self.id,
                    date: self.date,
                    home,
                    away,
                    home_win: self.home_win,
                },
            }),
            _ => Err(RatingError::IncompleteGame { game_id: self.id }.into()),
        }
    }
}

/// Groups ordered box-score rows into games
#[derive(Debug, Default)]
pub struct GameAssembler {
    finished: Vec<ScheduledGame>,
    seen: HashSet<GameId>,
    current: Option<PartialGame>,
}

impl GameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a complete row stream in one call
    pub fn assemble(rows: impl IntoIterator<Item = BoxScoreRow>) -> Result<Vec<ScheduledGame>> {
        let mut assembler = Self::new();
        for row in rows {
            assembler.push(row)?;
        }
        assembler.finish()
    }

    /// Feed the next row of the stream
    pub fn push(&mut self, row: BoxScoreRow) -> Result<()> {
        let same_game = self
            .current
            .as_ref()
            .is_some_and(|partial| partial.id == row.game_id);

        if !same_game {
            self.close_current()?;
            if !self.seen.insert(row.game_id.clone()) {
                return Err(RatingError::NonContiguousGame {
                    game_id: row.game_id,
                }
                .into());
            }
            self.current = Some(PartialGame::start(&row));
        }

        match self.current.as_mut() {
            Some(partial) => partial.push(row),
            None => Ok(()),
        }
    }

    /// Close the last game and return everything assembled
    pub fn finish(mut self) -> Result<Vec<ScheduledGame>> {
        self.close_current()?;
        debug!("Assembled {} games from box scores", self.finished.len());
        Ok(self.finished)
    }

    fn close_current(&mut self) -> Result<()> {
        if let Some(partial) = self.current.take() {
            self.finished.push(partial.finish()?);
        }
        Ok(())
    }
}

/// Group roster rows into zero-minute teams per season, keeping first-seen
/// team order and dropping duplicate players
pub fn assemble_rosters(
    rows: impl IntoIterator<Item = RosterRow>,
) -> BTreeMap<SeasonYear, Vec<Team>> {
    let mut seasons: BTreeMap<SeasonYear, Vec<Team>> = BTreeMap::new();

    for row in rows {
        let teams = seasons.entry(row.season).or_default();
        let index = match teams.iter().position(|t| t.name == row.team_name) {
            Some(index) => index,
            None => {
                teams.push(Team::new(row.team_name.clone(), Vec::new()));
                teams.len() - 1
            }
        };

        let team = &mut teams[index];
        if !team.players.iter().any(|p| p.id == row.player_id) {
            team.players
                .push(Player::new(row.player_id, row.player_name, 0.0));
        }
    }

    seasons
}

/// Read box-score rows from CSV with a header line
pub fn read_box_scores<R: Read>(reader: R) -> Result<Vec<BoxScoreRow>> {
    read_rows(reader).context("Failed to read box-score rows")
}

/// Read roster rows from CSV with a header line
pub fn read_rosters<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    read_rows(reader).context("Failed to read roster rows")
}

fn read_rows<R: Read, T: serde::de::DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
