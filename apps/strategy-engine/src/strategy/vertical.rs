//! Vertical credit spread builder (bull put / bear call).

use super::builder::{BuildContext, Built};
use super::error::StructureError;
use super::leg::{StrategyLeg, Structure};
use super::validation::{check_economics, check_spread_ordering, check_width};
use crate::options::OptionRight;

/// Resolve the short strike, place the long one width further out of the
/// money and validate the spread.
pub(crate) fn build(ctx: &BuildContext<'_>, right: OptionRight) -> Result<Built, StructureError> {
    let short = ctx.resolve_short(right)?;
    let width = ctx.target_width();
    let long = ctx.place_wing(&short, width)?;

    let (lower, upper) = match right {
        OptionRight::Put => (long.strike, short.strike),
        OptionRight::Call => (short.strike, long.strike),
    };
    check_spread_ordering(lower, upper)?;

    let spread_width = upper - lower;
    check_width(
        "spread",
        spread_width,
        width,
        ctx.config.width_tolerance_points(),
    )?;

    let quantity = ctx.request.quantity;
    let structure = Structure::Vertical {
        short: StrategyLeg::short(&short, quantity),
        long: StrategyLeg::long(long, quantity),
    };

    let credit = structure.net_credit();
    let max_risk = spread_width - credit;
    check_economics(credit, max_risk)?;

    let breakeven = match right {
        OptionRight::Put => short.strike - credit,
        OptionRight::Call => short.strike + credit,
    };
    let mut metrics = ctx.metrics(&structure, max_risk, vec![breakeven]);
    metrics.spread_width = Some(spread_width);

    Ok(Built {
        structure,
        metrics,
        low_match_confidence: short.is_closest_available(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::builder::test_support::*;
    use crate::config::Config;
    use crate::options::{OptionChainSnapshot, OptionRight};
    use crate::strategy::{
        BuildRequest, StrategyBuilder, StrategyCandidate, StrategyFamily, StrategyKind, Structure,
    };
    use crate::volatility::VolTier;
    use rust_decimal_macros::dec;

    fn build(chain: &OptionChainSnapshot, kind: StrategyKind, delta: f64) -> StrategyCandidate {
        let vol = volatility(60.0);
        let request = BuildRequest {
            symbol: "SPY",
            underlying_price: dec!(695),
            chain,
            volatility: &vol,
            target: target(StrategyFamily::VerticalSpread, delta, VolTier::High),
            quantity: 1,
        };
        StrategyBuilder::from_config(&Config::default()).build(kind, &request)
    }

    #[test]
    fn test_bull_put_spread() {
        let chain = standard_chain();
        let candidate = build(&chain, StrategyKind::BullPutSpread, 0.25);

        let Some(Structure::Vertical { short, long }) = candidate.structure() else {
            panic!("expected vertical: {:?}", candidate.invalid_reason());
        };
        assert_eq!(short.right, OptionRight::Put);
        assert_eq!(short.strike, dec!(660));
        assert_eq!(long.strike, dec!(650));

        let metrics = candidate.metrics().unwrap();
        // 2.60 - 1.80
        assert_eq!(metrics.net_credit, dec!(0.80));
        assert_eq!(metrics.spread_width, Some(dec!(10)));
        assert_eq!(metrics.max_risk, dec!(9.20));
        assert_eq!(metrics.breakevens, vec![dec!(659.20)]);
        assert!(metrics.delta_balance.is_none());
    }

    #[test]
    fn test_bear_call_spread() {
        let chain = standard_chain();
        let candidate = build(&chain, StrategyKind::BearCallSpread, 0.25);

        let Some(Structure::Vertical { short, long }) = candidate.structure() else {
            panic!("expected vertical: {:?}", candidate.invalid_reason());
        };
        assert_eq!(short.right, OptionRight::Call);
        assert_eq!(short.strike, dec!(730));
        assert_eq!(long.strike, dec!(740));
        assert_eq!(candidate.metrics().unwrap().breakevens, vec![dec!(730.80)]);
    }

    #[test]
    fn test_missing_lower_strike_collapses_spread() {
        // The short put is the lowest listed strike, so the wing rounds onto it.
        let quotes = vec![
            quote(OptionRight::Put, 660, Some(-0.25), dec!(2.60)),
            quote(OptionRight::Put, 670, Some(-0.35), dec!(3.60)),
            quote(OptionRight::Call, 730, Some(0.25), dec!(2.60)),
        ];
        let chain = OptionChainSnapshot::new("SPY", expiry(), as_of(), quotes).unwrap();
        let candidate = build(&chain, StrategyKind::BullPutSpread, 0.25);
        assert!(candidate.invalid_reason().unwrap().contains("out of order"));
    }

    #[test]
    fn test_low_iv_rank_prefers_debit() {
        let chain = standard_chain();
        let vol = volatility(10.0);
        let request = BuildRequest {
            symbol: "SPY",
            underlying_price: dec!(695),
            chain: &chain,
            volatility: &vol,
            target: target(StrategyFamily::VerticalSpread, 0.30, VolTier::Low),
            quantity: 1,
        };
        let candidate =
            StrategyBuilder::from_config(&Config::default()).build(StrategyKind::BearCallSpread, &request);
        assert_eq!(
            candidate.invalid_reason(),
            Some("low IV rank — credit structure not recommended")
        );
    }
}
