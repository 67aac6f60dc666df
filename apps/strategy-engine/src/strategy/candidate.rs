//! Candidate structures produced by the builders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::leg::Structure;
use super::types::StrategyKind;
use crate::volatility::VolTier;

/// Per-share economics of a valid structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMetrics {
    /// Short mids minus long mids.
    pub net_credit: Decimal,
    /// Worst-case loss per share.
    pub max_risk: Decimal,
    /// Iron condor put wing width.
    pub put_wing_width: Option<Decimal>,
    /// Iron condor call wing width.
    pub call_wing_width: Option<Decimal>,
    /// Vertical spread width.
    pub spread_width: Option<Decimal>,
    /// |abs(short put delta) - abs(short call delta)| for two-sided structures.
    pub delta_balance: Option<f64>,
    /// Price(s) at expiry where the position breaks even.
    pub breakevens: Vec<Decimal>,
    /// Largest absolute short delta.
    pub max_short_delta: f64,
    /// Net position delta.
    pub net_delta: f64,
}

/// Quality flags carried alongside a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFlags {
    /// A short strike was the closest available, not a converged match.
    pub low_match_confidence: bool,
    /// IV rank defaulted due to thin history.
    pub low_volatility_confidence: bool,
}

/// Terminal build outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    /// Structure passed validation.
    Valid {
        /// Legs.
        structure: Structure,
        /// Economics.
        metrics: CandidateMetrics,
    },
    /// Structure was rejected.
    Invalid {
        /// Why.
        reason: String,
    },
}

/// Output of one builder run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCandidate {
    /// Structure kind.
    pub kind: StrategyKind,
    /// Underlying symbol.
    pub symbol: String,
    /// Underlying price at build time.
    pub underlying_price: Decimal,
    /// Contracts per leg.
    pub quantity: u32,
    /// Shares per contract.
    pub contract_multiplier: u32,
    /// IV rank tier the target came from.
    pub tier: VolTier,
    /// Valid or invalid.
    #[serde(flatten)]
    pub status: CandidateStatus,
    /// Quality flags.
    pub flags: CandidateFlags,
}

impl StrategyCandidate {
    /// Whether the candidate passed validation.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.status, CandidateStatus::Valid { .. })
    }

    /// Legs of a valid candidate.
    #[must_use]
    pub const fn structure(&self) -> Option<&Structure> {
        match &self.status {
            CandidateStatus::Valid { structure, .. } => Some(structure),
            CandidateStatus::Invalid { .. } => None,
        }
    }

    /// Economics of a valid candidate.
    #[must_use]
    pub const fn metrics(&self) -> Option<&CandidateMetrics> {
        match &self.status {
            CandidateStatus::Valid { metrics, .. } => Some(metrics),
            CandidateStatus::Invalid { .. } => None,
        }
    }

    /// Rejection reason of an invalid candidate.
    #[must_use]
    pub fn invalid_reason(&self) -> Option<&str> {
        match &self.status {
            CandidateStatus::Valid { .. } => None,
            CandidateStatus::Invalid { reason } => Some(reason),
        }
    }
}
