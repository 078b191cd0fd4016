//! Common types used throughout the rating engine

use crate::error::RatingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skillratings::trueskill::TrueSkillRating;
use skillratings::weng_lin::WengLinRating;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for games
pub type GameId = String;

/// Season identifier: the calendar year in which the season starts
pub type SeasonYear = i32;

/// Default prior mean for a player who has never been rated
pub const DEFAULT_MEAN: f64 = 25.0;

/// Default prior standard deviation for a player who has never been rated
pub const DEFAULT_STD_DEV: f64 = 25.0 / 3.0;

/// Gaussian belief over one entity's latent skill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillBelief {
    pub mean: f64,
    pub std_dev: f64,
}

impl SkillBelief {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }
}

impl Default for SkillBelief {
    fn default() -> Self {
        Self {
            mean: DEFAULT_MEAN,
            std_dev: DEFAULT_STD_DEV,
        }
    }
}

impl From<TrueSkillRating> for SkillBelief {
    fn from(rating: TrueSkillRating) -> Self {
        Self {
            mean: rating.rating,
            std_dev: rating.uncertainty,
        }
    }
}

impl From<SkillBelief> for TrueSkillRating {
    fn from(belief: SkillBelief) -> Self {
        Self {
            rating: belief.mean,
            uncertainty: belief.std_dev,
        }
    }
}

impl From<WengLinRating> for SkillBelief {
    fn from(rating: WengLinRating) -> Self {
        Self {
            mean: rating.rating,
            std_dev: rating.uncertainty,
        }
    }
}

impl From<SkillBelief> for WengLinRating {
    fn from(belief: SkillBelief) -> Self {
        Self {
            rating: belief.mean,
            uncertainty: belief.std_dev,
        }
    }
}

/// Team-level belief expressed as mean and variance, the shape the
/// downstream feature tables consume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    pub mean: f64,
    pub variance: f64,
}

/// Result of a two-team contest from the point of view of team one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    TeamOneWins,
    TeamTwoWins,
}

impl Outcome {
    /// Rank pair (team one, team two) where 0 is first place
    pub fn ranks(&self) -> (u32, u32) {
        match self {
            Outcome::TeamOneWins => (0, 1),
            Outcome::TeamTwoWins => (1, 0),
            Outcome::Draw => (0, 0),
        }
    }

    /// Outcome of a game from the home team's perspective
    pub fn from_home_win(home_win: bool) -> Self {
        if home_win {
            Outcome::TeamOneWins
        } else {
            Outcome::TeamTwoWins
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RatingError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Outcome::Draw),
            1 => Ok(Outcome::TeamOneWins),
            2 => Ok(Outcome::TeamTwoWins),
            _ => Err(RatingError::InvalidOutcome { code }),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Draw => write!(f, "Draw"),
            Outcome::TeamOneWins => write!(f, "TeamOneWins"),
            Outcome::TeamTwoWins => write!(f, "TeamTwoWins"),
        }
    }
}

/// A player's appearance in one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub minutes: f64,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, minutes: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            minutes,
        }
    }
}

/// Players appearing for one team, scoped to a single game or roster snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    pub fn minutes(&self) -> Vec<f64> {
        self.players.iter().map(|p| p.minutes).collect()
    }
}

/// A fully parsed game with both lineups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub date: NaiveDate,
    pub home: Team,
    pub away: Team,
    pub home_win: bool,
}

impl Game {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_home_win(self.home_win)
    }

    /// Whether the home team takes the team_a slot, i.e. has the
    /// lexicographically greater name
    pub fn team_a_is_home(&self) -> bool {
        self.home.name >= self.away.name
    }

    /// Both teams in (team_a, team_b) order
    pub fn ordered_teams(&self) -> (&Team, &Team) {
        if self.team_a_is_home() {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        }
    }

    pub fn team_a_won(&self) -> bool {
        self.team_a_is_home() == self.home_win
    }
}

/// End-of-period rating for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRatingRow {
    pub season_start_year: SeasonYear,
    pub team_name: String,
    pub rating_mean: f64,
    pub rating_var: f64,
}

/// Team ratings captured immediately before a game is folded into state
///
/// `team_a` is the lexicographically greater team name, so the same pair of
/// teams always occupies the same slots regardless of venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PregameRatingRow {
    pub season_start_year: SeasonYear,
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_po_rating: f64,
    pub team_a_po_rating_var: f64,
    pub team_b_po_rating: f64,
    pub team_b_po_rating_var: f64,
    pub team_a_home: bool,
}

/// A playoff game's result and the series standing before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayoffGameRow {
    pub season_start_year: SeasonYear,
    pub game_id: GameId,
    pub game_date: NaiveDate,
    pub team_a_name: String,
    pub team_b_name: String,
    pub team_a_home: bool,
    /// 1-based position of this game within the pairing's series
    pub series_game_number: u32,
    pub team_a_series_wins: u32,
    pub team_b_series_wins: u32,
    pub series_diff: i32,
    pub team_a_win: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_belief_matches_prior() {
        let belief = SkillBelief::default();
        assert_eq!(belief.mean, 25.0);
        assert!((belief.std_dev - 8.333333).abs() < 1e-5);
        assert!((belief.variance() - 69.444444).abs() < 1e-4);
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(Outcome::try_from(0).unwrap(), Outcome::Draw);
        assert_eq!(Outcome::try_from(1).unwrap(), Outcome::TeamOneWins);
        assert_eq!(Outcome::try_from(2).unwrap(), Outcome::TeamTwoWins);
        assert_eq!(
            Outcome::try_from(3).unwrap_err(),
            RatingError::InvalidOutcome { code: 3 }
        );
        assert!(Outcome::try_from(-1).is_err());
    }

    #[test]
    fn test_outcome_ranks() {
        assert_eq!(Outcome::TeamOneWins.ranks(), (0, 1));
        assert_eq!(Outcome::TeamTwoWins.ranks(), (1, 0));
        assert_eq!(Outcome::Draw.ranks(), (0, 0));
        assert_eq!(Outcome::from_home_win(true), Outcome::TeamOneWins);
        assert_eq!(Outcome::from_home_win(false), Outcome::TeamTwoWins);
    }

    #[test]
    fn test_team_a_is_greater_name() {
        let game = Game {
            id: "g1".to_string(),
            date: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
            home: Team::new("Bucks", Vec::new()),
            away: Team::new("Suns", Vec::new()),
            home_win: true,
        };

        assert!(!game.team_a_is_home());
        let (team_a, team_b) = game.ordered_teams();
        assert_eq!(team_a.name, "Suns");
        assert_eq!(team_b.name, "Bucks");
        assert!(!game.team_a_won());
    }

    #[test]
    fn test_belief_conversions() {
        let belief = SkillBelief::new(30.0, 4.0);
        let ts: TrueSkillRating = belief.into();
        assert_eq!(ts.rating, 30.0);
        assert_eq!(ts.uncertainty, 4.0);
        assert_eq!(SkillBelief::from(ts), belief);

        let wl: WengLinRating = belief.into();
        assert_eq!(SkillBelief::from(wl), belief);
    }
}
