//! Structural properties that must hold for any target delta on a realistic
//! chain.
//!
//! Chains are Black-Scholes with 5 point strikes around a 700 underlying.
//! Chain IV stays within 15-40%, where every target in range has a listed
//! strike close enough for the builders to produce a valid structure.

#![allow(clippy::unwrap_used)]

mod common;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use common::{dense_chain, dense_chain_expiring, volatility};
use strategy_engine::config::{Config, DeltaRange};
use strategy_engine::strategy::{BuildRequest, StrategyBuilder, StrategyFamily, StrategyKind, Structure};
use strategy_engine::{
    DeltaTarget, MatchQuality, OptionChainSnapshot, OptionRight, ResolveParams, StrategyCandidate, VolTier,
    resolve,
};

const SPOT: f64 = 700.0;

fn spot() -> Decimal {
    Decimal::from_f64(SPOT).unwrap()
}

fn target(family: StrategyFamily, delta: f64) -> DeltaTarget {
    DeltaTarget {
        family,
        base_delta: delta,
        adjusted_delta: delta,
        tier: VolTier::High,
        prefer_debit: false,
        acceptable_band: DeltaRange::new(0.05, 0.45),
    }
}

fn build(chain: &OptionChainSnapshot, kind: StrategyKind, delta: f64) -> StrategyCandidate {
    let vol = volatility(chain.symbol(), 60.0);
    let request = BuildRequest {
        symbol: chain.symbol(),
        underlying_price: spot(),
        chain,
        volatility: &vol,
        target: target(kind.family(), delta),
        quantity: 1,
    };
    StrategyBuilder::from_config(&Config::default()).build(kind, &request)
}

/// Smallest |delta| error any listed strike of `right` offers for `target`.
fn best_listed_error(chain: &OptionChainSnapshot, right: OptionRight, target: f64) -> f64 {
    chain
        .quotes(right)
        .iter()
        .filter_map(|q| q.delta)
        .map(|delta| (delta.abs() - target).abs())
        .fold(f64::INFINITY, f64::min)
}

/// Chain IV, chain days to expiry, resolver IV and resolver days.
///
/// Resolver inputs are drawn independently of the chain so the first pivot
/// can land far from the target, including a zero expected move.
fn market() -> impl Strategy<Value = (f64, u32, f64, i64)> {
    (0.15f64..0.40, 7u32..90, 0.0f64..0.80, 1i64..90)
}

proptest! {
    #[test]
    fn iron_condor_is_ordered_and_balanced(delta in 0.08f64..0.30, chain_iv in 0.15f64..0.40) {
        let chain = dense_chain("PROP", SPOT, chain_iv, 5);
        let candidate = build(&chain, StrategyKind::IronCondor, delta);
        let config = Config::default();

        let Some(Structure::IronCondor { long_put, short_put, short_call, long_call }) = candidate.structure() else {
            return Err(TestCaseError::fail(format!(
                "iv {chain_iv} delta {delta}: {:?}",
                candidate.invalid_reason()
            )));
        };
        prop_assert!(long_put.strike < short_put.strike);
        prop_assert!(short_put.strike < short_call.strike);
        prop_assert!(short_call.strike < long_call.strike);

        let metrics = candidate.metrics().unwrap();
        let balance = metrics.delta_balance.unwrap();
        prop_assert!(balance <= config.strategies.iron_condor.balance_tolerance + 1e-9);
        prop_assert!(metrics.net_credit > Decimal::ZERO);
        prop_assert!(metrics.max_risk > Decimal::ZERO);

        let target_width = config.strategies.iron_condor.width.target_width(spot());
        let tolerance = config.strategies.iron_condor.width_tolerance_points();
        for width in [metrics.put_wing_width.unwrap(), metrics.call_wing_width.unwrap()] {
            prop_assert!((width - target_width).abs() <= tolerance);
        }
    }

    #[test]
    fn vertical_width_within_tolerance(delta in 0.15f64..0.40, chain_iv in 0.15f64..0.40, bull in any::<bool>()) {
        let chain = dense_chain("PROP", SPOT, chain_iv, 5);
        let kind = if bull { StrategyKind::BullPutSpread } else { StrategyKind::BearCallSpread };
        let candidate = build(&chain, kind, delta);
        let config = Config::default();

        prop_assert!(candidate.is_valid(), "{kind} iv {chain_iv} delta {delta}: {:?}", candidate.invalid_reason());
        let metrics = candidate.metrics().unwrap();
        let width = metrics.spread_width.unwrap();
        let target_width = config.strategies.vertical_spread.width.target_width(spot());
        prop_assert!((width - target_width).abs() <= config.strategies.vertical_spread.width_tolerance_points());
        prop_assert!(metrics.max_risk + metrics.net_credit == width);
    }

    #[test]
    fn resolution_converges_when_a_strike_is_within_tolerance(
        delta in 0.10f64..0.38,
        (chain_iv, chain_days, iv, dte) in market(),
        put in any::<bool>(),
    ) {
        let chain = dense_chain_expiring("PROP", SPOT, chain_iv, 5, chain_days);
        let right = if put { OptionRight::Put } else { OptionRight::Call };
        let params = ResolveParams::new(spot(), iv, dte);

        let resolved = resolve(&chain, right, delta, &params).unwrap();
        prop_assert!(resolved.iterations <= params.max_iterations);
        match resolved.quality {
            MatchQuality::Converged => prop_assert!(resolved.delta_error <= params.tolerance + 1e-9),
            MatchQuality::ClosestAvailable => {
                prop_assert!(best_listed_error(&chain, right, delta) > params.tolerance);
                prop_assert!(resolved.delta_error <= params.max_fallback_error + 1e-9);
            }
        }
    }

    #[test]
    fn resolution_is_idempotent(delta in 0.05f64..0.45, (chain_iv, chain_days, iv, dte) in market(), put in any::<bool>()) {
        let chain = dense_chain_expiring("PROP", SPOT, chain_iv, 5, chain_days);
        let right = if put { OptionRight::Put } else { OptionRight::Call };
        let params = ResolveParams::new(spot(), iv, dte);
        let first = resolve(&chain, right, delta, &params);
        let second = resolve(&chain, right, delta, &params);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn strikes_move_toward_the_money_with_target_delta((chain_iv, chain_days, iv, dte) in market()) {
        let chain = dense_chain_expiring("PROP", SPOT, chain_iv, 5, chain_days);
        let params = ResolveParams::new(spot(), iv, dte);

        let mut previous_put = Decimal::ZERO;
        let mut previous_call = Decimal::MAX;
        for step in 0..8 {
            let delta = 0.10 + 0.04 * f64::from(step);
            let put = resolve(&chain, OptionRight::Put, delta, &params).unwrap();
            let call = resolve(&chain, OptionRight::Call, delta, &params).unwrap();
            prop_assert!(put.strike >= previous_put, "delta {delta}: put {} < {previous_put}", put.strike);
            prop_assert!(call.strike <= previous_call, "delta {delta}: call {} > {previous_call}", call.strike);
            previous_put = put.strike;
            previous_call = call.strike;
        }
    }
}
