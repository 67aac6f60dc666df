//! Core option quote types.
//!
//! Defines the option right (put/call) and the per-contract quote pulled
//! from the market data collaborator.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option right (put or call).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Put option (right to sell).
    Put,
    /// Call option (right to buy).
    Call,
}

impl OptionRight {
    /// Direction of increasing out-of-the-money distance along the strike axis.
    ///
    /// Puts move OTM as strikes fall (-1), calls as strikes rise (+1).
    #[must_use]
    pub const fn otm_direction(self) -> i8 {
        match self {
            Self::Put => -1,
            Self::Call => 1,
        }
    }

    /// The opposite right.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Put => Self::Call,
            Self::Call => Self::Put,
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Put => write!(f, "PUT"),
            Self::Call => write!(f, "CALL"),
        }
    }
}

/// A single option quote from a chain snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price.
    pub strike: Decimal,
    /// Option right.
    pub right: OptionRight,
    /// Signed delta. `None` excludes the quote from strike resolution.
    #[serde(default)]
    pub delta: Option<f64>,
    /// Gamma.
    #[serde(default)]
    pub gamma: Option<f64>,
    /// Theta (per day).
    #[serde(default)]
    pub theta: Option<f64>,
    /// Vega (per 1% IV).
    #[serde(default)]
    pub vega: Option<f64>,
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
    /// Implied volatility (annualized, 0.25 = 25%).
    #[serde(default)]
    pub implied_volatility: Option<f64>,
    /// Expiration date.
    pub expiry: NaiveDate,
    /// Time the quote was captured.
    pub snapshot_time: DateTime<Utc>,
    /// Quote is known to be stale; its delta sign is not trusted.
    #[serde(default)]
    pub stale: bool,
}

impl OptionQuote {
    /// Create a quote with zero bid/ask and no Greeks.
    #[must_use]
    pub const fn new(
        right: OptionRight,
        strike: Decimal,
        expiry: NaiveDate,
        snapshot_time: DateTime<Utc>,
    ) -> Self {
        Self {
            strike,
            right,
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            bid: Decimal::ZERO,
            ask: Decimal::ZERO,
            implied_volatility: None,
            expiry,
            snapshot_time,
            stale: false,
        }
    }

    /// Set the delta.
    #[must_use]
    pub const fn with_delta(mut self, delta: f64) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Set bid and ask.
    #[must_use]
    pub const fn with_bid_ask(mut self, bid: Decimal, ask: Decimal) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    /// Set implied volatility.
    #[must_use]
    pub const fn with_iv(mut self, iv: f64) -> Self {
        self.implied_volatility = Some(iv);
        self
    }

    /// Set the second-order Greeks.
    #[must_use]
    pub const fn with_greeks(mut self, gamma: f64, theta: f64, vega: f64) -> Self {
        self.gamma = Some(gamma);
        self.theta = Some(theta);
        self.vega = Some(vega);
        self
    }

    /// Flag the quote as stale.
    #[must_use]
    pub const fn mark_stale(mut self) -> Self {
        self.stale = true;
        self
    }

    /// Bid/ask midpoint.
    #[must_use]
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Absolute delta, if present.
    #[must_use]
    pub fn delta_magnitude(&self) -> Option<f64> {
        self.delta.map(f64::abs)
    }

    /// Whether the delta sign agrees with the right (puts <= 0, calls >= 0).
    #[must_use]
    pub fn delta_sign_matches(&self) -> bool {
        match (self.delta, self.right) {
            (None, _) => true,
            (Some(d), OptionRight::Put) => d <= 0.0,
            (Some(d), OptionRight::Call) => d >= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(right: OptionRight, delta: f64) -> OptionQuote {
        OptionQuote::new(
            right,
            dec!(100),
            NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
            Utc::now(),
        )
        .with_delta(delta)
    }

    #[test]
    fn test_option_right_display() {
        assert_eq!(OptionRight::Put.to_string(), "PUT");
        assert_eq!(OptionRight::Call.to_string(), "CALL");
    }

    #[test]
    fn test_otm_direction() {
        assert_eq!(OptionRight::Put.otm_direction(), -1);
        assert_eq!(OptionRight::Call.otm_direction(), 1);
        assert_eq!(OptionRight::Put.opposite(), OptionRight::Call);
    }

    #[test]
    fn test_mid() {
        let q = quote(OptionRight::Call, 0.3).with_bid_ask(dec!(1.20), dec!(1.30));
        assert_eq!(q.mid(), dec!(1.25));
    }

    #[test]
    fn test_delta_sign() {
        assert!(quote(OptionRight::Put, -0.2).delta_sign_matches());
        assert!(!quote(OptionRight::Put, 0.2).delta_sign_matches());
        assert!(quote(OptionRight::Call, 0.2).delta_sign_matches());
        assert!(!quote(OptionRight::Call, -0.2).delta_sign_matches());
        assert_eq!(quote(OptionRight::Put, -0.2).delta_magnitude(), Some(0.2));
    }

    #[test]
    fn test_serde_screaming_case() {
        let json = serde_json::to_string(&OptionRight::Put).unwrap();
        assert_eq!(json, "\"PUT\"");
    }
}
