//! Shared chain and volatility builders for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;

use strategy_engine::volatility::VolConfidence;
use strategy_engine::{OptionChainSnapshot, OptionQuote, OptionRight, VolatilityContext};

pub fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 13).unwrap()
}

pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 15, 0, 0).unwrap()
}

/// Quote with bid/ask 0.05 either side of `mid`.
pub fn quote(right: OptionRight, strike: i64, delta: Option<f64>, mid: Decimal) -> OptionQuote {
    let quote = OptionQuote::new(right, Decimal::from(strike), expiry(), as_of())
        .with_bid_ask(mid - dec!(0.05), mid + dec!(0.05));
    match delta {
        Some(delta) => quote.with_delta(delta),
        None => quote,
    }
}

pub fn chain(symbol: &str, quotes: Vec<OptionQuote>) -> OptionChainSnapshot {
    OptionChainSnapshot::new(symbol, expiry(), as_of(), quotes).unwrap()
}

/// PUT deltas -0.10/-0.18/-0.25/-0.35 at 640-670 and CALL deltas
/// 0.35/0.25/0.18/0.10 at 720-750, plus 630 and 760 wings.
pub fn scenario_chain(symbol: &str) -> OptionChainSnapshot {
    let puts = [
        (630, -0.06, dec!(0.60)),
        (640, -0.10, dec!(1.00)),
        (650, -0.18, dec!(1.80)),
        (660, -0.25, dec!(2.60)),
        (670, -0.35, dec!(3.60)),
    ];
    let calls = [
        (720, 0.35, dec!(3.60)),
        (730, 0.25, dec!(2.60)),
        (740, 0.18, dec!(1.80)),
        (750, 0.10, dec!(1.00)),
        (760, 0.06, dec!(0.60)),
    ];
    let quotes = puts
        .iter()
        .map(|(k, d, m)| quote(OptionRight::Put, *k, Some(*d), *m))
        .chain(calls.iter().map(|(k, d, m)| quote(OptionRight::Call, *k, Some(*d), *m)))
        .collect();
    chain(symbol, quotes)
}

/// Only strikes with |delta| >= 0.25 carry deltas; the outer wings have none.
pub fn thin_chain(symbol: &str) -> OptionChainSnapshot {
    let quotes = vec![
        quote(OptionRight::Put, 650, None, dec!(1.80)),
        quote(OptionRight::Put, 660, Some(-0.25), dec!(2.60)),
        quote(OptionRight::Put, 670, Some(-0.35), dec!(3.60)),
        quote(OptionRight::Put, 680, Some(-0.45), dec!(4.60)),
        quote(OptionRight::Call, 710, Some(0.45), dec!(4.60)),
        quote(OptionRight::Call, 720, Some(0.35), dec!(3.60)),
        quote(OptionRight::Call, 730, Some(0.25), dec!(2.60)),
        quote(OptionRight::Call, 740, None, dec!(1.80)),
    ];
    chain(symbol, quotes)
}

/// Both sides listed but no quote carries a delta.
pub fn deltaless_chain(symbol: &str) -> OptionChainSnapshot {
    let quotes = vec![
        quote(OptionRight::Put, 650, None, dec!(1.80)),
        quote(OptionRight::Put, 660, None, dec!(2.60)),
        quote(OptionRight::Call, 730, None, dec!(2.60)),
        quote(OptionRight::Call, 740, None, dec!(1.80)),
    ];
    chain(symbol, quotes)
}

/// Black-Scholes chain (zero rates) with deltas rounded to four places and
/// mids rounded to cents. Quotes worth less than a nickel are omitted.
pub fn dense_chain(symbol: &str, spot: f64, iv: f64, increment: i64) -> OptionChainSnapshot {
    let days = u32::try_from((expiry() - as_of().date_naive()).num_days()).unwrap();
    dense_chain_expiring(symbol, spot, iv, increment, days)
}

/// [`dense_chain`] expiring `days` calendar days after [`as_of`].
pub fn dense_chain_expiring(symbol: &str, spot: f64, iv: f64, increment: i64, days: u32) -> OptionChainSnapshot {
    let expiry = as_of()
        .date_naive()
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap();
    let t = f64::from(days) / 365.0;
    let cdf = |x: f64| 0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2));
    let lo = ((spot * 0.7) as i64 / increment) * increment;
    let hi = ((spot * 1.3) as i64 / increment) * increment;

    let mut quotes = Vec::new();
    let mut strike = lo;
    while strike <= hi {
        let k = strike as f64;
        let d1 = ((spot / k).ln() + 0.5 * iv * iv * t) / (iv * t.sqrt());
        let d2 = d1 - iv * t.sqrt();
        let call = spot * cdf(d1) - k * cdf(d2);
        let put = k * cdf(-d2) - spot * cdf(-d1);
        let call_delta = (cdf(d1) * 10_000.0).round() / 10_000.0;
        let put_delta = ((cdf(d1) - 1.0) * 10_000.0).round() / 10_000.0;

        for (right, price, delta) in [
            (OptionRight::Call, call, call_delta),
            (OptionRight::Put, put, put_delta),
        ] {
            if price < 0.05 || delta == 0.0 {
                continue;
            }
            let mid = Decimal::from_f64(price).unwrap().round_dp(2);
            let quote = OptionQuote::new(right, Decimal::from(strike), expiry, as_of())
                .with_bid_ask(mid - dec!(0.05), mid + dec!(0.05))
                .with_delta(delta)
                .with_iv(iv);
            quotes.push(quote);
        }
        strike += increment;
    }
    OptionChainSnapshot::new(symbol, expiry, as_of(), quotes).unwrap()
}

pub fn volatility(symbol: &str, iv_rank: f64) -> VolatilityContext {
    VolatilityContext {
        symbol: symbol.to_string(),
        iv_rank,
        current_iv: Some(0.20),
        observations: 60,
        as_of: as_of().date_naive(),
        computed_at: as_of(),
        lookback_days: 60,
        confidence: VolConfidence::Normal,
    }
}
