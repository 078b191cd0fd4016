//! Rating engine configuration

use crate::error::{RatingError, Result};
use crate::rating::aggregator::FULL_GAME_MINUTES;
use crate::rating::engine::UNCERTAINTY_FLOOR;
use crate::types::{SkillBelief, DEFAULT_MEAN, DEFAULT_STD_DEV};
use serde::{Deserialize, Serialize};

/// Which two-party model rates the pseudo-belief contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestModelKind {
    TrueSkill,
    WengLin,
}

impl std::str::FromStr for ContestModelKind {
    type Err = RatingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trueskill" | "true_skill" => Ok(ContestModelKind::TrueSkill),
            "weng_lin" | "wenglin" | "openskill" => Ok(ContestModelKind::WengLin),
            other => Err(RatingError::ConfigurationError {
                message: format!("Unknown contest model: {}", other),
            }),
        }
    }
}

/// Parameters of the rating engine and team aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub contest_model: ContestModelKind,
    /// Prior mean for new players
    pub initial_mean: f64,
    /// Prior standard deviation for new players
    pub initial_std_dev: f64,
    /// Performance noise; defaults to half the prior standard deviation
    pub beta: Option<f64>,
    /// TrueSkill dynamics; defaults to a hundredth of the prior standard deviation
    pub dynamics: Option<f64>,
    /// Smallest standard deviation a player may reach
    pub uncertainty_floor: f64,
    /// Weighted minutes below which team ratings are padded with the prior
    pub full_game_minutes: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            contest_model: ContestModelKind::TrueSkill,
            initial_mean: DEFAULT_MEAN,
            initial_std_dev: DEFAULT_STD_DEV,
            beta: None,
            dynamics: None,
            uncertainty_floor: UNCERTAINTY_FLOOR,
            full_game_minutes: FULL_GAME_MINUTES,
        }
    }
}

impl RatingConfig {
    pub fn prior(&self) -> SkillBelief {
        SkillBelief::new(self.initial_mean, self.initial_std_dev)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let fail = |message: &str| -> Result<()> {
            Err(RatingError::ConfigurationError {
                message: message.to_string(),
            }
            .into())
        };

        if !self.initial_mean.is_finite() {
            return fail("Initial mean must be finite");
        }
        if !(self.initial_std_dev > 0.0) {
            return fail("Initial standard deviation must be positive");
        }
        if let Some(beta) = self.beta {
            if !(beta > 0.0) {
                return fail("Beta must be positive");
            }
        }
        if let Some(dynamics) = self.dynamics {
            if !(dynamics >= 0.0) {
                return fail("Dynamics must be non-negative");
            }
        }
        if !(self.uncertainty_floor > 0.0) {
            return fail("Uncertainty floor must be positive");
        }
        if !(self.full_game_minutes > 0.0) {
            return fail("Full game minutes must be positive");
        }

        Ok(())
    }
}
