//! Per-family delta targets, widths and tolerances.
//!
//! Every number a builder or the delta calculator needs lives here so that
//! tuning a family never touches algorithmic code.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::strategy::StrategyFamily;

/// Closed range of absolute delta values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl DeltaRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a delta magnitude into the range.
    #[must_use]
    pub fn clamp(&self, delta: f64) -> f64 {
        delta.clamp(self.min, self.max)
    }

    /// Whether the magnitude lies inside the range.
    #[must_use]
    pub fn contains(&self, delta: f64) -> bool {
        (self.min..=self.max).contains(&delta)
    }
}

/// Adjusted delta range for each credit-eligible tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierDeltas {
    /// Rich premiums: sell further OTM.
    pub very_high: DeltaRange,
    /// Standard target.
    pub high: DeltaRange,
    /// Fair premiums: move toward ATM.
    pub moderate: DeltaRange,
}

/// Wing / spread width expressed as a fraction of the underlying with point bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthConfig {
    /// Target width as a fraction of price (0.015 = 1.5%).
    pub target_pct: f64,
    /// Minimum width in price points.
    pub min_points: f64,
    /// Maximum width in price points.
    pub max_points: f64,
}

impl WidthConfig {
    /// `clamp(price * target_pct, min_points, max_points)`.
    #[must_use]
    pub fn target_width(&self, underlying_price: Decimal) -> Decimal {
        let pct = Decimal::from_f64(self.target_pct).unwrap_or(Decimal::ZERO);
        let min = Decimal::from_f64(self.min_points).unwrap_or(Decimal::ZERO);
        let max = Decimal::from_f64(self.max_points).unwrap_or(Decimal::ZERO);
        (underlying_price * pct).clamp(min, max)
    }
}

/// Tuning for one strategy family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Anchor delta before tier adjustment.
    pub base_delta: f64,
    /// Adjusted ranges per tier.
    pub tier_deltas: TierDeltas,
    /// Band an accepted short delta must fall in (wheel legs).
    pub acceptable_band: DeltaRange,
    /// Wing / spread width.
    pub width: WidthConfig,
    /// Maximum |abs(put delta) - abs(call delta)| for two-sided structures.
    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: f64,
    /// Allowed deviation of a realised width from its target, in points.
    #[serde(default = "default_width_tolerance")]
    pub width_tolerance: f64,
}

impl FamilyConfig {
    /// Width tolerance as a decimal.
    #[must_use]
    pub fn width_tolerance_points(&self) -> Decimal {
        Decimal::from_f64(self.width_tolerance).unwrap_or(Decimal::ZERO)
    }
}

/// Configuration for every strategy family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategiesConfig {
    /// Iron condor.
    #[serde(default = "default_iron_condor")]
    pub iron_condor: FamilyConfig,
    /// Vertical credit spreads (bull put / bear call).
    #[serde(default = "default_vertical_spread")]
    pub vertical_spread: FamilyConfig,
    /// Wheel cash-secured put.
    #[serde(default = "default_wheel_csp")]
    pub wheel_csp: FamilyConfig,
    /// Wheel covered call.
    #[serde(default = "default_wheel_cc")]
    pub wheel_cc: FamilyConfig,
}

impl Default for StrategiesConfig {
    fn default() -> Self {
        Self {
            iron_condor: default_iron_condor(),
            vertical_spread: default_vertical_spread(),
            wheel_csp: default_wheel_csp(),
            wheel_cc: default_wheel_cc(),
        }
    }
}

impl StrategiesConfig {
    /// Configuration for a family.
    #[must_use]
    pub const fn family(&self, family: StrategyFamily) -> &FamilyConfig {
        match family {
            StrategyFamily::IronCondor => &self.iron_condor,
            StrategyFamily::VerticalSpread => &self.vertical_spread,
            StrategyFamily::WheelCsp => &self.wheel_csp,
            StrategyFamily::WheelCc => &self.wheel_cc,
        }
    }

    /// All families with their configuration.
    pub fn iter(&self) -> impl Iterator<Item = (StrategyFamily, &FamilyConfig)> {
        StrategyFamily::ALL
            .into_iter()
            .map(move |family| (family, self.family(family)))
    }
}

const fn default_balance_tolerance() -> f64 {
    0.05
}

const fn default_width_tolerance() -> f64 {
    2.0
}

fn default_iron_condor() -> FamilyConfig {
    FamilyConfig {
        base_delta: 0.16,
        tier_deltas: TierDeltas {
            very_high: DeltaRange::new(0.10, 0.14),
            high: DeltaRange::new(0.16, 0.20),
            moderate: DeltaRange::new(0.20, 0.25),
        },
        acceptable_band: DeltaRange::new(0.05, 0.30),
        width: WidthConfig {
            target_pct: 0.015,
            min_points: 5.0,
            max_points: 25.0,
        },
        balance_tolerance: default_balance_tolerance(),
        width_tolerance: default_width_tolerance(),
    }
}

fn default_vertical_spread() -> FamilyConfig {
    FamilyConfig {
        base_delta: 0.30,
        tier_deltas: TierDeltas {
            very_high: DeltaRange::new(0.20, 0.25),
            high: DeltaRange::new(0.25, 0.35),
            moderate: DeltaRange::new(0.35, 0.40),
        },
        acceptable_band: DeltaRange::new(0.15, 0.45),
        width: WidthConfig {
            target_pct: 0.015,
            min_points: 5.0,
            max_points: 25.0,
        },
        balance_tolerance: default_balance_tolerance(),
        width_tolerance: default_width_tolerance(),
    }
}

fn default_wheel_csp() -> FamilyConfig {
    FamilyConfig {
        base_delta: 0.30,
        tier_deltas: TierDeltas {
            very_high: DeltaRange::new(0.25, 0.30),
            high: DeltaRange::new(0.30, 0.40),
            moderate: DeltaRange::new(0.40, 0.45),
        },
        acceptable_band: DeltaRange::new(0.20, 0.45),
        width: WidthConfig {
            target_pct: 0.0,
            min_points: 0.0,
            max_points: 0.0,
        },
        balance_tolerance: default_balance_tolerance(),
        width_tolerance: default_width_tolerance(),
    }
}

fn default_wheel_cc() -> FamilyConfig {
    FamilyConfig {
        base_delta: 0.30,
        ..default_wheel_csp()
    }
}
