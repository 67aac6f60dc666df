//! IV rank lookback and tier boundary configuration.

use serde::{Deserialize, Serialize};

/// Volatility context configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Trailing window of observations used for IV rank.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Minimum observations before the rank is trusted.
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
    /// IV rank tier boundaries.
    #[serde(default)]
    pub tiers: TierBoundaries,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            min_observations: default_min_observations(),
            tiers: TierBoundaries::default(),
        }
    }
}

/// Lower bounds (inclusive) of each IV rank tier. Anything below `moderate` is LOW.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBoundaries {
    /// VERY_HIGH starts here.
    pub very_high: f64,
    /// HIGH starts here.
    pub high: f64,
    /// MODERATE starts here.
    pub moderate: f64,
}

impl Default for TierBoundaries {
    fn default() -> Self {
        Self {
            very_high: 75.0,
            high: 50.0,
            moderate: 25.0,
        }
    }
}

const fn default_lookback_days() -> u32 {
    60
}

const fn default_min_observations() -> usize {
    20
}
