//! Immutable option chain snapshot.
//!
//! A snapshot owns every quote for one (symbol, expiry) pair, split by right
//! and sorted by ascending strike. It is validated once at construction and
//! never mutated afterwards, so resolution can hold plain slices into it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{OptionQuote, OptionRight};

/// Errors from chain snapshot construction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChainError {
    /// Strike is zero or negative.
    #[error("Non-positive strike {strike} in {right} quotes")]
    NonPositiveStrike {
        /// Option right.
        right: OptionRight,
        /// Offending strike.
        strike: Decimal,
    },

    /// Two quotes share the same (strike, right).
    #[error("Duplicate {right} quote at strike {strike}")]
    DuplicateStrike {
        /// Option right.
        right: OptionRight,
        /// Duplicated strike.
        strike: Decimal,
    },

    /// Delta sign disagrees with the right on a quote not flagged stale.
    #[error("{right} quote at strike {strike} has delta {delta} with the wrong sign")]
    DeltaSignMismatch {
        /// Option right.
        right: OptionRight,
        /// Strike.
        strike: Decimal,
        /// Reported delta.
        delta: f64,
    },

    /// Delta magnitude outside [0, 1].
    #[error("{right} quote at strike {strike} has delta {delta} outside [-1, 1]")]
    DeltaOutOfRange {
        /// Option right.
        right: OptionRight,
        /// Strike.
        strike: Decimal,
        /// Reported delta.
        delta: f64,
    },

    /// Quote expiry differs from the snapshot expiry.
    #[error("Quote at strike {strike} expires {found}, snapshot expiry is {expected}")]
    ExpiryMismatch {
        /// Strike.
        strike: Decimal,
        /// Snapshot expiry.
        expected: NaiveDate,
        /// Quote expiry.
        found: NaiveDate,
    },

    /// Negative or crossed bid/ask.
    #[error("Invalid {right} quote at strike {strike}: {message}")]
    InvalidQuote {
        /// Option right.
        right: OptionRight,
        /// Strike.
        strike: Decimal,
        /// Error message.
        message: String,
    },
}

/// Raw, unvalidated chain payload as delivered by a market data adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshotData {
    /// Underlying symbol.
    pub symbol: String,
    /// Expiration date shared by every quote.
    pub expiry: NaiveDate,
    /// Snapshot time.
    pub as_of: DateTime<Utc>,
    /// Quotes in any order.
    pub quotes: Vec<OptionQuote>,
}

/// Strike-sorted, read-only option chain for one (symbol, expiry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChainSnapshotData", into = "ChainSnapshotData")]
pub struct OptionChainSnapshot {
    symbol: String,
    expiry: NaiveDate,
    as_of: DateTime<Utc>,
    puts: Vec<OptionQuote>,
    calls: Vec<OptionQuote>,
}

impl TryFrom<ChainSnapshotData> for OptionChainSnapshot {
    type Error = ChainError;

    fn try_from(data: ChainSnapshotData) -> Result<Self, Self::Error> {
        Self::new(data.symbol, data.expiry, data.as_of, data.quotes)
    }
}

impl From<OptionChainSnapshot> for ChainSnapshotData {
    fn from(chain: OptionChainSnapshot) -> Self {
        let mut quotes = chain.puts;
        quotes.extend(chain.calls);
        Self {
            symbol: chain.symbol,
            expiry: chain.expiry,
            as_of: chain.as_of,
            quotes,
        }
    }
}

impl OptionChainSnapshot {
    /// Validate and sort quotes into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `ChainError` if any quote violates the snapshot invariants.
    pub fn new(
        symbol: impl Into<String>,
        expiry: NaiveDate,
        as_of: DateTime<Utc>,
        quotes: Vec<OptionQuote>,
    ) -> Result<Self, ChainError> {
        let mut puts = Vec::new();
        let mut calls = Vec::new();

        for quote in quotes {
            validate_quote(&quote, expiry)?;
            match quote.right {
                OptionRight::Put => puts.push(quote),
                OptionRight::Call => calls.push(quote),
            }
        }

        sort_and_check(&mut puts, OptionRight::Put)?;
        sort_and_check(&mut calls, OptionRight::Call)?;

        Ok(Self {
            symbol: symbol.into(),
            expiry,
            as_of,
            puts,
            calls,
        })
    }

    /// Underlying symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Expiration date.
    #[must_use]
    pub const fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    /// Snapshot time.
    #[must_use]
    pub const fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Quotes for one right, ascending by strike.
    #[must_use]
    pub fn quotes(&self, right: OptionRight) -> &[OptionQuote] {
        match right {
            OptionRight::Put => &self.puts,
            OptionRight::Call => &self.calls,
        }
    }

    /// Total number of quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.puts.len() + self.calls.len()
    }

    /// Whether the snapshot holds no quotes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.puts.is_empty() && self.calls.is_empty()
    }

    /// Whether both puts and calls are present.
    #[must_use]
    pub fn has_both_sides(&self) -> bool {
        !self.puts.is_empty() && !self.calls.is_empty()
    }

    /// Quote for an exact (right, strike).
    #[must_use]
    pub fn quote(&self, right: OptionRight, strike: Decimal) -> Option<&OptionQuote> {
        let quotes = self.quotes(right);
        quotes
            .binary_search_by(|q| q.strike.cmp(&strike))
            .ok()
            .map(|i| &quotes[i])
    }

    /// Listed quote whose strike is nearest `target`.
    ///
    /// Ties resolve to the strike further out of the money.
    #[must_use]
    pub fn nearest(&self, right: OptionRight, target: Decimal) -> Option<&OptionQuote> {
        let quotes = self.quotes(right);
        let idx = nearest_index(quotes, target, right)?;
        quotes.get(idx)
    }

    /// Smallest gap between adjacent listed strikes for a right.
    #[must_use]
    pub fn strike_increment(&self, right: OptionRight) -> Option<Decimal> {
        self.quotes(right)
            .windows(2)
            .map(|w| w[1].strike - w[0].strike)
            .min()
    }

    /// Calendar days from the snapshot date to expiry (never negative).
    #[must_use]
    pub fn days_to_expiry(&self) -> i64 {
        (self.expiry - self.as_of.date_naive()).num_days().max(0)
    }

    /// Implied volatility of the quote nearest the underlying price.
    ///
    /// Looks at both rights and skips quotes without an IV.
    #[must_use]
    pub fn atm_implied_vol(&self, underlying_price: Decimal) -> Option<f64> {
        self.puts
            .iter()
            .chain(self.calls.iter())
            .filter_map(|q| q.implied_volatility.map(|iv| ((q.strike - underlying_price).abs(), iv)))
            .min_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, iv)| iv)
    }
}

/// Index of the quote nearest `target`; ties go further out of the money.
fn nearest_index(
    quotes: &[OptionQuote],
    target: Decimal,
    right: OptionRight,
) -> Option<usize> {
    if quotes.is_empty() {
        return None;
    }
    let pos = quotes.partition_point(|q| q.strike < target);
    let below = pos.checked_sub(1);
    let above = (pos < quotes.len()).then_some(pos);

    match (below, above) {
        (Some(b), Some(a)) => {
            let diff_below = target - quotes[b].strike;
            let diff_above = quotes[a].strike - target;
            match diff_below.cmp(&diff_above) {
                std::cmp::Ordering::Less => Some(b),
                std::cmp::Ordering::Greater => Some(a),
                std::cmp::Ordering::Equal => match right {
                    OptionRight::Put => Some(b),
                    OptionRight::Call => Some(a),
                },
            }
        }
        (Some(b), None) => Some(b),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

fn validate_quote(quote: &OptionQuote, expiry: NaiveDate) -> Result<(), ChainError> {
    if quote.strike <= Decimal::ZERO {
        return Err(ChainError::NonPositiveStrike {
            right: quote.right,
            strike: quote.strike,
        });
    }

    if quote.expiry != expiry {
        return Err(ChainError::ExpiryMismatch {
            strike: quote.strike,
            expected: expiry,
            found: quote.expiry,
        });
    }

    if let Some(delta) = quote.delta {
        if !(-1.0..=1.0).contains(&delta) {
            return Err(ChainError::DeltaOutOfRange {
                right: quote.right,
                strike: quote.strike,
                delta,
            });
        }
        if !quote.stale && !quote.delta_sign_matches() {
            return Err(ChainError::DeltaSignMismatch {
                right: quote.right,
                strike: quote.strike,
                delta,
            });
        }
    }

    if quote.bid < Decimal::ZERO || quote.ask < Decimal::ZERO {
        return Err(ChainError::InvalidQuote {
            right: quote.right,
            strike: quote.strike,
            message: "negative bid or ask".to_string(),
        });
    }

    if quote.bid > quote.ask {
        return Err(ChainError::InvalidQuote {
            right: quote.right,
            strike: quote.strike,
            message: format!("crossed market: bid {} > ask {}", quote.bid, quote.ask),
        });
    }

    Ok(())
}

fn sort_and_check(quotes: &mut [OptionQuote], right: OptionRight) -> Result<(), ChainError> {
    quotes.sort_by(|a, b| a.strike.cmp(&b.strike));
    if let Some(dup) = quotes.windows(2).find(|w| w[0].strike == w[1].strike) {
        return Err(ChainError::DuplicateStrike {
            right,
            strike: dup[0].strike,
        });
    }
    Ok(())
}

/// Strike as `f64` for search arithmetic.
pub(crate) fn strike_f64(strike: Decimal) -> f64 {
    strike.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 13).unwrap()
    }

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap()
    }

    fn quote(right: OptionRight, strike: Decimal, delta: f64) -> OptionQuote {
        OptionQuote::new(right, strike, expiry(), as_of())
            .with_delta(delta)
            .with_bid_ask(dec!(1.00), dec!(1.10))
    }

    fn sample_chain() -> OptionChainSnapshot {
        OptionChainSnapshot::new(
            "SPY",
            expiry(),
            as_of(),
            vec![
                quote(OptionRight::Put, dec!(660), -0.25),
                quote(OptionRight::Put, dec!(640), -0.10),
                quote(OptionRight::Call, dec!(730), 0.25),
                quote(OptionRight::Put, dec!(650), -0.18),
                quote(OptionRight::Call, dec!(720), 0.35).with_iv(0.21),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_quotes_sorted_by_strike() {
        let chain = sample_chain();
        let strikes: Vec<Decimal> = chain
            .quotes(OptionRight::Put)
            .iter()
            .map(|q| q.strike)
            .collect();
        assert_eq!(strikes, vec![dec!(640), dec!(650), dec!(660)]);
        assert_eq!(chain.len(), 5);
        assert!(chain.has_both_sides());
    }

    #[test]
    fn test_duplicate_strike_rejected() {
        let result = OptionChainSnapshot::new(
            "SPY",
            expiry(),
            as_of(),
            vec![
                quote(OptionRight::Put, dec!(650), -0.18),
                quote(OptionRight::Put, dec!(650), -0.19),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            ChainError::DuplicateStrike {
                right: OptionRight::Put,
                strike: dec!(650)
            }
        );
    }

    #[test]
    fn test_same_strike_both_rights_allowed() {
        let chain = OptionChainSnapshot::new(
            "SPY",
            expiry(),
            as_of(),
            vec![
                quote(OptionRight::Put, dec!(700), -0.50),
                quote(OptionRight::Call, dec!(700), 0.50),
            ],
        )
        .unwrap();
        assert!(chain.quote(OptionRight::Put, dec!(700)).is_some());
        assert!(chain.quote(OptionRight::Call, dec!(700)).is_some());
    }

    #[test]
    fn test_delta_sign_mismatch_rejected_unless_stale() {
        let bad = quote(OptionRight::Put, dec!(650), 0.18);
        let result = OptionChainSnapshot::new("SPY", expiry(), as_of(), vec![bad.clone()]);
        assert!(matches!(
            result,
            Err(ChainError::DeltaSignMismatch { .. })
        ));

        let stale = bad.mark_stale();
        assert!(OptionChainSnapshot::new("SPY", expiry(), as_of(), vec![stale]).is_ok());
    }

    #[test]
    fn test_expiry_mismatch_rejected() {
        let other = OptionQuote::new(
            OptionRight::Call,
            dec!(700),
            NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
            as_of(),
        );
        let result = OptionChainSnapshot::new("SPY", expiry(), as_of(), vec![other]);
        assert!(matches!(result, Err(ChainError::ExpiryMismatch { .. })));
    }

    #[test]
    fn test_crossed_quote_rejected() {
        let crossed = quote(OptionRight::Call, dec!(700), 0.4).with_bid_ask(dec!(2), dec!(1));
        let result = OptionChainSnapshot::new("SPY", expiry(), as_of(), vec![crossed]);
        assert!(matches!(result, Err(ChainError::InvalidQuote { .. })));
    }

    #[test]
    fn test_nearest_ties_go_otm() {
        let chain = sample_chain();
        // 645 is equidistant from 640 and 650; puts go further OTM (lower).
        let q = chain.nearest(OptionRight::Put, dec!(645)).unwrap();
        assert_eq!(q.strike, dec!(640));
        // 725 is equidistant from 720 and 730; calls go further OTM (higher).
        let q = chain.nearest(OptionRight::Call, dec!(725)).unwrap();
        assert_eq!(q.strike, dec!(730));
        // Outside the listed range clamps to the edge.
        let q = chain.nearest(OptionRight::Put, dec!(500)).unwrap();
        assert_eq!(q.strike, dec!(640));
    }

    #[test]
    fn test_strike_increment_and_dte() {
        let chain = sample_chain();
        assert_eq!(chain.strike_increment(OptionRight::Put), Some(dec!(10)));
        assert_eq!(chain.days_to_expiry(), 30);
        assert_eq!(chain.atm_implied_vol(dec!(700)), Some(0.21));
    }

    #[test]
    fn test_empty_chain() {
        let chain = OptionChainSnapshot::new("SPY", expiry(), as_of(), vec![]).unwrap();
        assert!(chain.is_empty());
        assert!(!chain.has_both_sides());
        assert_eq!(chain.strike_increment(OptionRight::Call), None);
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let chain = sample_chain();
        let json = serde_json::to_string(&chain).unwrap();
        let back: OptionChainSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);

        // Flip the 640 put delta positive; deserialization must re-validate.
        let bad = json.replace("-0.1,", "0.1,");
        let result: Result<OptionChainSnapshot, _> = serde_json::from_str(&bad);
        assert!(result.is_err());
    }
}
