//! Contest model trait and implementations
//!
//! A contest model rates one two-party game between two single beliefs.
//! The minute-weighted engine collapses each lineup into one pseudo-belief
//! and hands the pair to whichever model is configured.

use crate::types::{Outcome, SkillBelief};

/// Trait for two-party skill updates
pub trait ContestModel: Send + Sync + std::fmt::Debug {
    /// Rate a single contest between two beliefs
    ///
    /// # Arguments
    /// * `one` - Belief of the first party
    /// * `two` - Belief of the second party
    /// * `outcome` - Result from the first party's point of view
    ///
    /// # Returns
    /// Posterior beliefs for both parties, in argument order
    fn rate_pair(
        &self,
        one: &SkillBelief,
        two: &SkillBelief,
        outcome: Outcome,
    ) -> (SkillBelief, SkillBelief);

    /// Prior belief for players seen for the first time
    fn initial_belief(&self) -> SkillBelief;

    /// Short model name for logging
    fn name(&self) -> &'static str;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Model that never moves a belief, for exercising bookkeeping in isolation
#[derive(Debug, Clone)]
pub struct NoOpContestModel {
    initial_belief: SkillBelief,
}

impl NoOpContestModel {
    pub fn new(initial_belief: SkillBelief) -> Self {
        Self { initial_belief }
    }
}

impl Default for NoOpContestModel {
    fn default() -> Self {
        Self::new(SkillBelief::default())
    }
}

impl ContestModel for NoOpContestModel {
    fn rate_pair(
        &self,
        one: &SkillBelief,
        two: &SkillBelief,
        _outcome: Outcome,
    ) -> (SkillBelief, SkillBelief) {
        (*one, *two)
    }

    fn initial_belief(&self) -> SkillBelief {
        self.initial_belief
    }

    fn name(&self) -> &'static str {
        "no_op"
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_mean": self.initial_belief.mean,
            "initial_std_dev": self.initial_belief.std_dev
        })
    }
}
