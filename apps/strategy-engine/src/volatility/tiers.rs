//! IV rank tiers and delta target adjustment.

use serde::{Deserialize, Serialize};

use crate::config::{DeltaRange, FamilyConfig, TierBoundaries};
use crate::strategy::StrategyFamily;

/// IV rank tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolTier {
    /// Rich premiums.
    VeryHigh,
    /// Above-median premiums.
    High,
    /// Fair premiums.
    Moderate,
    /// Thin premiums; credit structures are not recommended.
    Low,
}

impl VolTier {
    /// Classify an IV rank against the configured boundaries.
    #[must_use]
    pub fn classify(iv_rank: f64, tiers: &TierBoundaries) -> Self {
        if iv_rank >= tiers.very_high {
            Self::VeryHigh
        } else if iv_rank >= tiers.high {
            Self::High
        } else if iv_rank >= tiers.moderate {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Whether credit structures should be replaced by debit structures.
    #[must_use]
    pub const fn prefers_debit(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl std::fmt::Display for VolTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryHigh => write!(f, "VERY_HIGH"),
            Self::High => write!(f, "HIGH"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Volatility-adjusted short delta for one strategy family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaTarget {
    /// Strategy family the target applies to.
    pub family: StrategyFamily,
    /// Family anchor delta.
    pub base_delta: f64,
    /// Delta magnitude the resolver aims for.
    pub adjusted_delta: f64,
    /// Tier the IV rank fell in.
    pub tier: VolTier,
    /// Credit structures should not be built.
    pub prefer_debit: bool,
    /// Band an accepted single-leg short delta must fall in.
    pub acceptable_band: DeltaRange,
}

/// Adjust a family's base delta for the current IV rank.
///
/// Credit tiers clamp `base_delta` into the tier's configured range. LOW keeps
/// the base delta and sets `prefer_debit`.
#[must_use]
pub fn adjust_delta(
    config: &FamilyConfig,
    tiers: &TierBoundaries,
    iv_rank: f64,
    family: StrategyFamily,
) -> DeltaTarget {
    let tier = VolTier::classify(iv_rank, tiers);
    let adjusted_delta = match tier {
        VolTier::VeryHigh => config.tier_deltas.very_high.clamp(config.base_delta),
        VolTier::High => config.tier_deltas.high.clamp(config.base_delta),
        VolTier::Moderate => config.tier_deltas.moderate.clamp(config.base_delta),
        VolTier::Low => config.base_delta,
    };

    DeltaTarget {
        family,
        base_delta: config.base_delta,
        adjusted_delta,
        tier,
        prefer_debit: tier.prefers_debit(),
        acceptable_band: config.acceptable_band,
    }
}
