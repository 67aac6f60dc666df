//! Wheel legs: cash-secured put and covered call.

use super::builder::{BuildContext, Built};
use super::error::StructureError;
use super::leg::{StrategyLeg, Structure};
use super::validation::{check_delta_band, check_economics};
use crate::options::OptionRight;

/// Resolve a single short leg and validate it against the family band.
///
/// A short put is secured by cash at the strike; a short call is covered by
/// shares bought at the underlying price.
pub(crate) fn build(ctx: &BuildContext<'_>, right: OptionRight) -> Result<Built, StructureError> {
    let short = ctx.resolve_short(right)?;
    check_delta_band(short.delta, &ctx.request.target.acceptable_band)?;

    let structure = Structure::Wheel {
        short: StrategyLeg::short(&short, ctx.request.quantity),
    };

    let credit = structure.net_credit();
    let (max_risk, breakeven) = match right {
        OptionRight::Put => (short.strike - credit, short.strike - credit),
        OptionRight::Call => (
            ctx.request.underlying_price - credit,
            ctx.request.underlying_price - credit,
        ),
    };
    check_economics(credit, max_risk)?;

    let metrics = ctx.metrics(&structure, max_risk, vec![breakeven]);

    Ok(Built {
        structure,
        metrics,
        low_match_confidence: short.is_closest_available(),
    })
}
