//! Scored strategy output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::strategy::{StrategyCandidate, StrategyKind};

/// Individual 0-100 component scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Risk/reward ratio score.
    pub risk_reward: f64,
    /// Probability of success (100 - max short |delta| * 100).
    pub probability_of_success: f64,
    /// Expected return score.
    pub expected_return: f64,
    /// Volatility tier score.
    pub vol_context: f64,
}

/// A valid candidate with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStrategy {
    /// The scored candidate.
    pub candidate: StrategyCandidate,
    /// Composite score in [0, 100], one decimal.
    pub score: f64,
    /// Component scores.
    pub components: ComponentScores,
    /// max_risk / net_credit.
    pub risk_reward_ratio: f64,
    /// Expected profit in dollars (multiplier and quantity applied).
    pub expected_return_amount: Decimal,
    /// Expected profit as a fraction of max risk.
    pub expected_return_pct: f64,
}

impl ScoredStrategy {
    /// Structure kind.
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        self.candidate.kind
    }

    /// Probability of success.
    #[must_use]
    pub const fn probability_of_success(&self) -> f64 {
        self.components.probability_of_success
    }
}

/// One candidate that was discarded before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Structure kind.
    pub kind: StrategyKind,
    /// Why it was rejected.
    pub reason: String,
}
