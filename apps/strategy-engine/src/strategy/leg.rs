//! Legs and fixed-shape structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::options::{OptionQuote, OptionRight};
use crate::resolver::ResolvedStrike;

/// Position side (long or short).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    /// Bought.
    Long,
    /// Sold / written.
    Short,
}

impl PositionSide {
    /// Sign multiplier for position arithmetic.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Long => 1,
            Self::Short => -1,
        }
    }
}

/// One leg of a candidate structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyLeg {
    /// Option right.
    pub right: OptionRight,
    /// Listed strike.
    pub strike: Decimal,
    /// Long or short.
    pub side: PositionSide,
    /// Contracts (positive).
    pub quantity: u32,
    /// Signed quote delta; wings placed by width may carry none.
    pub resolved_delta: Option<f64>,
    /// Quote mid.
    pub mid: Decimal,
}

impl StrategyLeg {
    /// Short leg from a resolved strike.
    #[must_use]
    pub fn short(resolved: &ResolvedStrike, quantity: u32) -> Self {
        Self {
            right: resolved.right,
            strike: resolved.strike,
            side: PositionSide::Short,
            quantity,
            resolved_delta: Some(resolved.delta),
            mid: resolved.mid,
        }
    }

    /// Long leg from a listed quote.
    #[must_use]
    pub fn long(quote: &OptionQuote, quantity: u32) -> Self {
        Self {
            right: quote.right,
            strike: quote.strike,
            side: PositionSide::Long,
            quantity,
            resolved_delta: quote.delta,
            mid: quote.mid(),
        }
    }

    /// Signed position delta per share (`0` when the quote had none).
    #[must_use]
    pub fn position_delta(&self) -> f64 {
        self.resolved_delta.unwrap_or(0.0) * f64::from(self.side.sign()) * f64::from(self.quantity)
    }
}

/// Legs of a candidate, shaped per family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Structure {
    /// Four legs: long put < short put < short call < long call.
    IronCondor {
        /// Protective put.
        long_put: StrategyLeg,
        /// Sold put.
        short_put: StrategyLeg,
        /// Sold call.
        short_call: StrategyLeg,
        /// Protective call.
        long_call: StrategyLeg,
    },
    /// Two legs of the same right.
    Vertical {
        /// Sold leg.
        short: StrategyLeg,
        /// Protective leg.
        long: StrategyLeg,
    },
    /// One short leg.
    Wheel {
        /// Sold leg.
        short: StrategyLeg,
    },
}

impl Structure {
    /// All legs, ascending by strike within the structure's shape.
    #[must_use]
    pub fn legs(&self) -> Vec<&StrategyLeg> {
        match self {
            Self::IronCondor {
                long_put,
                short_put,
                short_call,
                long_call,
            } => vec![long_put, short_put, short_call, long_call],
            Self::Vertical { short, long } => {
                if long.strike < short.strike {
                    vec![long, short]
                } else {
                    vec![short, long]
                }
            }
            Self::Wheel { short } => vec![short],
        }
    }

    /// Sold legs.
    #[must_use]
    pub fn short_legs(&self) -> Vec<&StrategyLeg> {
        match self {
            Self::IronCondor {
                short_put,
                short_call,
                ..
            } => vec![short_put, short_call],
            Self::Vertical { short, .. } | Self::Wheel { short } => vec![short],
        }
    }

    /// Largest absolute delta among the sold legs.
    #[must_use]
    pub fn max_short_delta(&self) -> f64 {
        self.short_legs()
            .iter()
            .filter_map(|leg| leg.resolved_delta)
            .map(f64::abs)
            .fold(0.0, f64::max)
    }

    /// Short mids minus long mids, per share.
    #[must_use]
    pub fn net_credit(&self) -> Decimal {
        self.legs()
            .iter()
            .map(|leg| match leg.side {
                PositionSide::Short => leg.mid,
                PositionSide::Long => -leg.mid,
            })
            .sum()
    }

    /// Net position delta across every leg.
    #[must_use]
    pub fn net_delta(&self) -> f64 {
        self.legs().iter().map(|leg| leg.position_delta()).sum()
    }
}
