//! Strike resolution inputs and outputs.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::options::OptionRight;

/// Market inputs and tolerances for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolveParams {
    /// Underlying price.
    pub underlying_price: Decimal,
    /// Annualized implied volatility used to place the first pivot.
    pub implied_vol: f64,
    /// Calendar days to expiry.
    pub days_to_expiry: i64,
    /// Accepted |delta error| for convergence.
    pub tolerance: f64,
    /// Hard cap on search iterations.
    pub max_iterations: u32,
    /// Largest delta error a closest-available fallback may carry.
    pub max_fallback_error: f64,
}

impl ResolveParams {
    /// Params with default tolerances.
    #[must_use]
    pub fn new(underlying_price: Decimal, implied_vol: f64, days_to_expiry: i64) -> Self {
        Self::from_config(
            underlying_price,
            implied_vol,
            days_to_expiry,
            &ResolverConfig::default(),
        )
    }

    /// Params with tolerances taken from configuration.
    #[must_use]
    pub const fn from_config(
        underlying_price: Decimal,
        implied_vol: f64,
        days_to_expiry: i64,
        config: &ResolverConfig,
    ) -> Self {
        Self {
            underlying_price,
            implied_vol,
            days_to_expiry,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            max_fallback_error: config.max_fallback_error,
        }
    }

    /// One standard deviation move to expiry, in price points.
    #[must_use]
    pub fn expected_move(&self) -> f64 {
        let price = self.underlying_price.to_f64().unwrap_or(0.0);
        let years = self.days_to_expiry.max(0) as f64 / 365.0;
        price * self.implied_vol.max(0.0) * years.sqrt()
    }
}

/// How the resolved strike was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchQuality {
    /// Delta error within tolerance.
    Converged,
    /// Best listed strike, outside tolerance but within the fallback bound.
    ClosestAvailable,
}

/// A strike located by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStrike {
    /// Option right.
    pub right: OptionRight,
    /// Listed strike.
    pub strike: Decimal,
    /// Signed quote delta.
    pub delta: f64,
    /// Quote mid.
    pub mid: Decimal,
    /// |abs(delta) - target|.
    pub delta_error: f64,
    /// Search iterations used.
    pub iterations: u32,
    /// Match quality.
    pub quality: MatchQuality,
}

impl ResolvedStrike {
    /// Whether the strike is a fallback rather than a converged match.
    #[must_use]
    pub fn is_closest_available(&self) -> bool {
        self.quality == MatchQuality::ClosestAvailable
    }

    /// Absolute delta.
    #[must_use]
    pub fn delta_magnitude(&self) -> f64 {
        self.delta.abs()
    }
}
