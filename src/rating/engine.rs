//! Minute-weighted pairwise update engine
//!
//! Each lineup is collapsed into one pseudo-belief by moment matching the
//! minute-weighted player beliefs, the two pseudo-beliefs are rated as a
//! single contest, and the resulting shift is handed back to every player in
//! proportion to their share of the minutes.

use crate::config::{ContestModelKind, RatingConfig};
use crate::error::{RatingError, Result};
use crate::rating::calculator::ContestModel;
use crate::rating::trueskill::{ExtendedTrueSkillConfig, TrueSkillModel};
use crate::rating::weng_lin::{ExtendedWengLinConfig, WengLinModel};
use crate::types::{Outcome, SkillBelief, TeamRating};
use tracing::trace;

/// Smallest standard deviation a player belief may reach
pub const UNCERTAINTY_FLOOR: f64 = 1e-4;

/// Scale weights so they sum to one
pub fn normalize_weights(team: &str, weights: &[f64]) -> Result<Vec<f64>> {
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(RatingError::InvalidWeight {
            team: team.to_string(),
            weight: *bad,
        }
        .into());
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(RatingError::ZeroWeightSum {
            team: team.to_string(),
        }
        .into());
    }

    Ok(weights.iter().map(|w| w / total).collect())
}

/// Linear combination of independent Gaussians: mean is the weighted sum of
/// means, variance the sum of squared weights times variances
pub fn moment_match(beliefs: &[SkillBelief], weights: &[f64]) -> TeamRating {
    let mut mean = 0.0;
    let mut variance = 0.0;
    for (belief, weight) in beliefs.iter().zip(weights) {
        mean += weight * belief.mean;
        variance += weight * weight * belief.variance();
    }
    TeamRating { mean, variance }
}

/// Weighted two-lineup update engine
#[derive(Debug)]
pub struct PairwiseUpdateEngine {
    model: Box<dyn ContestModel>,
    uncertainty_floor: f64,
}

impl PairwiseUpdateEngine {
    pub fn new(model: Box<dyn ContestModel>, uncertainty_floor: f64) -> Self {
        Self {
            model,
            uncertainty_floor,
        }
    }

    /// Build the engine described by a rating configuration
    pub fn from_config(config: &RatingConfig) -> Result<Self> {
        config.validate()?;

        let model: Box<dyn ContestModel> = match config.contest_model {
            ContestModelKind::TrueSkill => {
                let mut ts = ExtendedTrueSkillConfig::with_prior(
                    config.initial_mean,
                    config.initial_std_dev,
                );
                if let Some(beta) = config.beta {
                    ts.trueskill_config.beta = beta;
                }
                if let Some(dynamics) = config.dynamics {
                    ts.trueskill_config.default_dynamics = dynamics;
                }
                Box::new(TrueSkillModel::new(ts)?)
            }
            ContestModelKind::WengLin => {
                let mut wl =
                    ExtendedWengLinConfig::with_prior(config.initial_mean, config.initial_std_dev);
                if let Some(beta) = config.beta {
                    wl.weng_lin_config.beta = beta;
                }
                Box::new(WengLinModel::new(wl)?)
            }
        };

        Ok(Self::new(model, config.uncertainty_floor))
    }

    pub fn model(&self) -> &dyn ContestModel {
        self.model.as_ref()
    }

    /// Prior belief for players seen for the first time
    pub fn initial_belief(&self) -> SkillBelief {
        self.model.initial_belief()
    }

    /// Rate one game between two weighted lineups
    ///
    /// # Arguments
    /// * `team_one` / `team_two` - Current beliefs of every player who appeared
    /// * `weights_one` / `weights_two` - Minutes played, aligned with the beliefs
    /// * `outcome` - Result from team one's point of view
    ///
    /// # Returns
    /// Updated beliefs for both lineups, in input order
    pub fn update(
        &self,
        team_one: &[SkillBelief],
        team_two: &[SkillBelief],
        weights_one: &[f64],
        weights_two: &[f64],
        outcome: Outcome,
    ) -> Result<(Vec<SkillBelief>, Vec<SkillBelief>)> {
        check_lineup("team one", team_one, weights_one)?;
        check_lineup("team two", team_two, weights_two)?;

        let w_one = normalize_weights("team one", weights_one)?;
        let w_two = normalize_weights("team two", weights_two)?;

        let pseudo_one = pseudo_belief(team_one, &w_one);
        let pseudo_two = pseudo_belief(team_two, &w_two);

        let (rated_one, rated_two) = self.model.rate_pair(&pseudo_one, &pseudo_two, outcome);

        let delta_one = (
            rated_one.mean - pseudo_one.mean,
            rated_one.std_dev - pseudo_one.std_dev,
        );
        let delta_two = (
            rated_two.mean - pseudo_two.mean,
            rated_two.std_dev - pseudo_two.std_dev,
        );
        trace!(
            "{} contest {}: team one shift ({:.4}, {:.4}), team two shift ({:.4}, {:.4})",
            self.model.name(),
            outcome,
            delta_one.0,
            delta_one.1,
            delta_two.0,
            delta_two.1
        );

        Ok((
            self.redistribute(team_one, &w_one, delta_one),
            self.redistribute(team_two, &w_two, delta_two),
        ))
    }

    fn redistribute(
        &self,
        beliefs: &[SkillBelief],
        weights: &[f64],
        (delta_mean, delta_std_dev): (f64, f64),
    ) -> Vec<SkillBelief> {
        beliefs
            .iter()
            .zip(weights)
            .map(|(belief, weight)| SkillBelief {
                mean: belief.mean + delta_mean * weight,
                std_dev: (belief.std_dev + delta_std_dev * weight).max(self.uncertainty_floor),
            })
            .collect()
    }
}

impl Default for PairwiseUpdateEngine {
    fn default() -> Self {
        Self::new(Box::new(TrueSkillModel::default()), UNCERTAINTY_FLOOR)
    }
}

fn check_lineup(team: &str, beliefs: &[SkillBelief], weights: &[f64]) -> Result<()> {
    if beliefs.is_empty() {
        return Err(RatingError::EmptyLineup {
            team: team.to_string(),
        }
        .into());
    }

    if beliefs.len() != weights.len() {
        return Err(RatingError::WeightMismatch {
            team: team.to_string(),
            players: beliefs.len(),
            weights: weights.len(),
        }
        .into());
    }

    Ok(())
}

fn pseudo_belief(beliefs: &[SkillBelief], normalized: &[f64]) -> SkillBelief {
    let matched = moment_match(beliefs, normalized);
    SkillBelief::new(matched.mean, matched.variance.sqrt())
}
