//! Weng-Lin (OpenSkill) contest model
//!
//! Alternative to TrueSkill for the pseudo-belief contest, using the
//! Weng-Lin algorithm from the skillratings crate.

use crate::error::{RatingError, Result};
use crate::rating::calculator::ContestModel;
use crate::rating::trueskill::to_outcomes;
use crate::types::{Outcome, SkillBelief, DEFAULT_MEAN, DEFAULT_STD_DEV};
use serde::{Deserialize, Serialize};
use skillratings::weng_lin::{weng_lin, WengLinConfig};

/// Extended configuration for the Weng-Lin model
/// This wraps the skillratings WengLinConfig with the prior for new players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedWengLinConfig {
    /// Core Weng-Lin parameters
    pub weng_lin_config: WengLinConfig,
    /// Prior mean for new players
    pub initial_mean: f64,
    /// Prior standard deviation for new players
    pub initial_std_dev: f64,
}

impl Default for ExtendedWengLinConfig {
    fn default() -> Self {
        Self::with_prior(DEFAULT_MEAN, DEFAULT_STD_DEV)
    }
}

impl ExtendedWengLinConfig {
    pub fn with_prior(initial_mean: f64, initial_std_dev: f64) -> Self {
        Self {
            weng_lin_config: WengLinConfig {
                beta: initial_std_dev / 2.0,
                uncertainty_tolerance: 0.000_001,
            },
            initial_mean,
            initial_std_dev,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.weng_lin_config.beta <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.weng_lin_config.uncertainty_tolerance < 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "Uncertainty tolerance must be non-negative".to_string(),
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

/// Weng-Lin contest model
#[derive(Debug)]
pub struct WengLinModel {
    config: ExtendedWengLinConfig,
}

impl WengLinModel {
    pub fn new(config: ExtendedWengLinConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }
}

impl ContestModel for WengLinModel {
    fn rate_pair(
        &self,
        one: &SkillBelief,
        two: &SkillBelief,
        outcome: Outcome,
    ) -> (SkillBelief, SkillBelief) {
        let (new_one, new_two) = weng_lin(
            &(*one).into(),
            &(*two).into(),
            &to_outcomes(outcome),
            &self.config.weng_lin_config,
        );
        (new_one.into(), new_two.into())
    }

    fn initial_belief(&self) -> SkillBelief {
        SkillBelief::new(self.config.initial_mean, self.config.initial_std_dev)
    }

    fn name(&self) -> &'static str {
        "weng_lin"
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_weng_lin_config_validation() {
        let mut config = ExtendedWengLinConfig::default();
        assert!(config.validate().is_ok());

        config.weng_lin_config.beta = -1.0;
        assert!(config.validate().is_err());

        config = ExtendedWengLinConfig::default();
        config.weng_lin_config.uncertainty_tolerance = -1.0;
        assert!(config.validate().is_err());

        config = ExtendedWengLinConfig::default();
        config.initial_std_dev = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rating_two_parties() {
        let model = WengLinModel::new(ExtendedWengLinConfig::default()).unwrap();
        let prior = model.initial_belief();
        assert_eq!(prior.mean, 25.0);

        let (winner, loser) = model.rate_pair(&prior, &prior, Outcome::TeamOneWins);
        assert!(winner.mean > prior.mean);
        assert!(loser.mean < prior.mean);
        assert!(winner.std_dev <= prior.std_dev);
    }
}
