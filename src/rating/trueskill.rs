//! TrueSkill contest model
//!
//! This module provides the default contest model using the TrueSkill
//! algorithm from the skillratings crate, configured without draw mass
//! since draws are not a modeled game result.

use crate::error::{RatingError, Result};
use crate::rating::calculator::ContestModel;
use crate::types::{Outcome, SkillBelief, DEFAULT_MEAN, DEFAULT_STD_DEV};
use serde::{Deserialize, Serialize};
use skillratings::trueskill::{trueskill, TrueSkillConfig};
use skillratings::Outcomes;

/// Extended configuration for the TrueSkill model
/// This wraps the skillratings TrueSkillConfig with the prior for new players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedTrueSkillConfig {
    /// Core TrueSkill parameters
    pub trueskill_config: TrueSkillConfig,
    /// Prior mean for new players
    pub initial_mean: f64,
    /// Prior standard deviation for new players
    pub initial_std_dev: f64,
}

impl Default for ExtendedTrueSkillConfig {
    fn default() -> Self {
        Self::with_prior(DEFAULT_MEAN, DEFAULT_STD_DEV)
    }
}

impl ExtendedTrueSkillConfig {
    /// Classic environment scaled to a prior: beta = sigma / 2, tau = sigma / 100
    pub fn with_prior(initial_mean: f64, initial_std_dev: f64) -> Self {
        Self {
            trueskill_config: TrueSkillConfig {
                draw_probability: 0.0,
                beta: initial_std_dev / 2.0,
                default_dynamics: initial_std_dev / 100.0,
            },
            initial_mean,
            initial_std_dev,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.trueskill_config.beta <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.trueskill_config.default_dynamics < 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Dynamics must be non-negative".to_string(),
            }
            .into());
        }

        if !(0.0..1.0).contains(&self.trueskill_config.draw_probability) {
            return Err(RatingError::ConfigurationError {
                message: "Draw probability must be in [0, 1)".to_string(),
            }
            .into());
        }

        if self.initial_std_dev <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Initial standard deviation must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// TrueSkill contest model
#[derive(Debug)]
pub struct TrueSkillModel {
    config: ExtendedTrueSkillConfig,
}

impl TrueSkillModel {
    pub fn new(config: ExtendedTrueSkillConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }
}

impl Default for TrueSkillModel {
    fn default() -> Self {
        Self {
            config: ExtendedTrueSkillConfig::default(),
        }
    }
}

pub(crate) fn to_outcomes(outcome: Outcome) -> Outcomes {
    match outcome {
        Outcome::TeamOneWins => Outcomes::WIN,
        Outcome::TeamTwoWins => Outcomes::LOSS,
        Outcome::Draw => Outcomes::DRAW,
    }
}

impl ContestModel for TrueSkillModel {
    fn rate_pair(
        &self,
        one: &SkillBelief,
        two: &SkillBelief,
        outcome: Outcome,
    ) -> (SkillBelief, SkillBelief) {
        let (new_one, new_two) = trueskill(
            &(*one).into(),
            &(*two).into(),
            &to_outcomes(outcome),
            &self.config.trueskill_config,
        );
        (new_one.into(), new_two.into())
    }

    fn initial_belief(&self) -> SkillBelief {
        SkillBelief::new(self.config.initial_mean, self.config.initial_std_dev)
    }

    fn name(&self) -> &'static str {
        "trueskill"
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
