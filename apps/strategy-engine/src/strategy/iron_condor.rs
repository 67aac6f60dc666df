//! Iron condor builder.

use super::builder::{BuildContext, Built};
use super::error::StructureError;
use super::leg::{StrategyLeg, Structure};
use super::validation::{check_condor_ordering, check_delta_balance, check_economics, check_width};
use crate::options::OptionRight;

/// Resolve both short strikes, place both wings and validate the condor.
///
/// Checks run in order: strike ordering (collision first), delta balance,
/// wing widths, then economics.
pub(crate) fn build(ctx: &BuildContext<'_>) -> Result<Built, StructureError> {
    let short_put = ctx.resolve_short(OptionRight::Put)?;
    let short_call = ctx.resolve_short(OptionRight::Call)?;

    let width = ctx.target_width();
    let long_put = ctx.place_wing(&short_put, width)?;
    let long_call = ctx.place_wing(&short_call, width)?;

    check_condor_ordering(
        long_put.strike,
        short_put.strike,
        short_call.strike,
        long_call.strike,
    )?;

    let balance = check_delta_balance(
        short_put.delta,
        short_call.delta,
        ctx.config.balance_tolerance,
    )?;

    let tolerance = ctx.config.width_tolerance_points();
    let put_wing = short_put.strike - long_put.strike;
    let call_wing = long_call.strike - short_call.strike;
    check_width("put wing", put_wing, width, tolerance)?;
    check_width("call wing", call_wing, width, tolerance)?;

    let quantity = ctx.request.quantity;
    let structure = Structure::IronCondor {
        long_put: StrategyLeg::long(long_put, quantity),
        short_put: StrategyLeg::short(&short_put, quantity),
        short_call: StrategyLeg::short(&short_call, quantity),
        long_call: StrategyLeg::long(long_call, quantity),
    };

    let credit = structure.net_credit();
    let max_risk = put_wing.max(call_wing) - credit;
    check_economics(credit, max_risk)?;

    let mut metrics = ctx.metrics(
        &structure,
        max_risk,
        vec![short_put.strike - credit, short_call.strike + credit],
    );
    metrics.put_wing_width = Some(put_wing);
    metrics.call_wing_width = Some(call_wing);
    metrics.delta_balance = Some(balance);

    Ok(Built {
        structure,
        metrics,
        low_match_confidence: short_put.is_closest_available()
            || short_call.is_closest_available(),
    })
}
