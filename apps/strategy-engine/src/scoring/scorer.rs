//! Composite strategy scoring.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::types::{ComponentScores, ScoredStrategy};
use crate::config::ScoringConfig;
use crate::strategy::{CandidateStatus, StrategyCandidate};
use crate::volatility::VolTier;

/// Scores valid candidates.
#[derive(Debug, Clone)]
pub struct StrategyScorer {
    config: ScoringConfig,
}

impl StrategyScorer {
    /// Create a scorer.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a candidate. Returns `None` for invalid candidates and for
    /// candidates whose economics cannot be expressed as finite numbers.
    #[must_use]
    pub fn score(&self, candidate: &StrategyCandidate, tier: VolTier) -> Option<ScoredStrategy> {
        let CandidateStatus::Valid { metrics, .. } = &candidate.status else {
            return None;
        };

        let credit = metrics.net_credit.to_f64()?;
        let risk = metrics.max_risk.to_f64()?;
        if credit <= 0.0 || risk <= 0.0 {
            return None;
        }

        let probability_of_success = (100.0 - metrics.max_short_delta * 100.0).clamp(0.0, 100.0);
        let p = probability_of_success / 100.0;

        let risk_reward_ratio = risk / credit;
        let expected_per_share = credit * p - risk * (1.0 - p);
        let expected_return_pct = expected_per_share / risk;

        let components = ComponentScores {
            risk_reward: self.risk_reward_score(risk_reward_ratio),
            probability_of_success,
            expected_return: self.expected_return_score(expected_return_pct),
            vol_context: vol_context_score(tier),
        };

        let w = &self.config.weights;
        let composite = w.risk_reward * components.risk_reward
            + w.probability_of_success * components.probability_of_success
            + w.expected_return * components.expected_return
            + w.vol_context * components.vol_context;

        let contracts = f64::from(candidate.contract_multiplier) * f64::from(candidate.quantity);
        let expected_return_amount = Decimal::from_f64(expected_per_share * contracts)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2);

        Some(ScoredStrategy {
            candidate: candidate.clone(),
            score: round_one_decimal(composite.clamp(0.0, 100.0)),
            components,
            risk_reward_ratio,
            expected_return_amount,
            expected_return_pct,
        })
    }

    /// 100 at a ratio of 1 or better, falling linearly to 0 at the ceiling.
    fn risk_reward_score(&self, ratio: f64) -> f64 {
        let ceiling = self.config.risk_reward_ceiling;
        if ratio <= 1.0 {
            100.0
        } else if ratio >= ceiling {
            0.0
        } else {
            100.0 * (ceiling - ratio) / (ceiling - 1.0)
        }
    }

    fn expected_return_score(&self, pct: f64) -> f64 {
        (pct / self.config.expected_return_ceiling).clamp(0.0, 1.0) * 100.0
    }
}

/// Fair premiums score best; rich premiums carry tail risk; thin premiums
/// barely pay.
#[must_use]
pub const fn vol_context_score(tier: VolTier) -> f64 {
    match tier {
        VolTier::Moderate => 100.0,
        VolTier::VeryHigh | VolTier::High => 75.0,
        VolTier::Low => 25.0,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
