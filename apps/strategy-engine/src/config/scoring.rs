//! Composite score weights and normalisation ceilings.

use serde::{Deserialize, Serialize};

/// Scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Component weights.
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Risk/reward ratio at which the risk/reward score reaches zero.
    #[serde(default = "default_risk_reward_ceiling")]
    pub risk_reward_ceiling: f64,
    /// Expected return (fraction of max risk) mapped to a score of 100.
    #[serde(default = "default_expected_return_ceiling")]
    pub expected_return_ceiling: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            risk_reward_ceiling: default_risk_reward_ceiling(),
            expected_return_ceiling: default_expected_return_ceiling(),
        }
    }
}

/// Weights of the four score components. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Risk/reward component.
    pub risk_reward: f64,
    /// Probability of success component.
    pub probability_of_success: f64,
    /// Expected return component.
    pub expected_return: f64,
    /// Volatility context component.
    pub vol_context: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            risk_reward: 0.30,
            probability_of_success: 0.30,
            expected_return: 0.25,
            vol_context: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.risk_reward + self.probability_of_success + self.expected_return + self.vol_context
    }
}

const fn default_risk_reward_ceiling() -> f64 {
    5.0
}

const fn default_expected_return_ceiling() -> f64 {
    0.5
}
