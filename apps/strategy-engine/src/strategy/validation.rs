//! Structural invariant checks shared by the builders.

use rust_decimal::Decimal;

use super::error::StructureError;
use crate::config::DeltaRange;

/// Strict `long_put < short_put < short_call < long_call`.
///
/// Equal short strikes are reported as a collision rather than an ordering
/// failure.
pub fn check_condor_ordering(
    long_put: Decimal,
    short_put: Decimal,
    short_call: Decimal,
    long_call: Decimal,
) -> Result<(), StructureError> {
    if short_put == short_call {
        return Err(StructureError::StrikeCollision { strike: short_put });
    }
    if !(long_put < short_put && short_put < short_call && short_call < long_call) {
        return Err(StructureError::InvalidOrdering {
            message: format!(
                "long put {long_put}, short put {short_put}, short call {short_call}, long call {long_call}"
            ),
        });
    }
    Ok(())
}

/// Strict `lower < upper` for a two-leg spread.
pub fn check_spread_ordering(lower: Decimal, upper: Decimal) -> Result<(), StructureError> {
    if lower < upper {
        Ok(())
    } else {
        Err(StructureError::InvalidOrdering {
            message: format!("lower strike {lower} is not below upper strike {upper}"),
        })
    }
}

/// `|abs(put delta) - abs(call delta)| <= tolerance`; returns the balance.
pub fn check_delta_balance(
    put_delta: f64,
    call_delta: f64,
    tolerance: f64,
) -> Result<f64, StructureError> {
    let balance = (put_delta.abs() - call_delta.abs()).abs();
    if balance <= tolerance + 1e-9 {
        Ok(balance)
    } else {
        Err(StructureError::DeltaImbalance { balance, tolerance })
    }
}

/// `|actual - target| <= tolerance`.
pub fn check_width(
    wing: &'static str,
    actual: Decimal,
    target: Decimal,
    tolerance: Decimal,
) -> Result<(), StructureError> {
    if (actual - target).abs() <= tolerance {
        Ok(())
    } else {
        Err(StructureError::WidthOutOfTolerance {
            wing,
            actual,
            target,
            tolerance,
        })
    }
}

/// Absolute delta lies inside the band.
pub fn check_delta_band(delta: f64, band: &DeltaRange) -> Result<(), StructureError> {
    let delta = delta.abs();
    if band.contains(delta) {
        Ok(())
    } else {
        Err(StructureError::DeltaOutsideBand {
            delta,
            min: band.min,
            max: band.max,
        })
    }
}

/// Positive credit and positive max risk.
pub fn check_economics(credit: Decimal, max_risk: Decimal) -> Result<(), StructureError> {
    if credit <= Decimal::ZERO {
        return Err(StructureError::NonPositiveCredit { credit });
    }
    if max_risk <= Decimal::ZERO {
        return Err(StructureError::NonPositiveRisk { risk: max_risk });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_condor_ordering() {
        assert!(check_condor_ordering(dec!(640), dec!(650), dec!(740), dec!(750)).is_ok());

        let collided = check_condor_ordering(dec!(690), dec!(700), dec!(700), dec!(710));
        assert_eq!(
            collided,
            Err(StructureError::StrikeCollision { strike: dec!(700) })
        );

        let crossed = check_condor_ordering(dec!(700), dec!(710), dec!(690), dec!(700));
        assert!(matches!(crossed, Err(StructureError::InvalidOrdering { .. })));

        // Wing collapsed onto the short strike.
        let collapsed = check_condor_ordering(dec!(650), dec!(650), dec!(740), dec!(750));
        assert!(matches!(collapsed, Err(StructureError::InvalidOrdering { .. })));
    }

    #[test]
    fn test_delta_balance() {
        assert!((check_delta_balance(-0.18, 0.18, 0.05).unwrap()).abs() < 1e-12);
        assert!(check_delta_balance(-0.16, 0.21, 0.05).is_ok());
        assert!(matches!(
            check_delta_balance(-0.10, 0.25, 0.05),
            Err(StructureError::DeltaImbalance { .. })
        ));
    }

    #[test]
    fn test_width_tolerance() {
        assert!(check_width("put wing", dec!(10), dec!(10.425), dec!(2)).is_ok());
        assert!(check_width("put wing", dec!(15), dec!(10.425), dec!(2)).is_err());
    }

    #[test]
    fn test_delta_band() {
        let band = DeltaRange::new(0.20, 0.45);
        assert!(check_delta_band(-0.30, &band).is_ok());
        assert!(check_delta_band(-0.10, &band).is_err());
    }

    #[test]
    fn test_economics() {
        assert!(check_economics(dec!(1.2), dec!(8.8)).is_ok());
        assert!(matches!(
            check_economics(dec!(0), dec!(10)),
            Err(StructureError::NonPositiveCredit { .. })
        ));
        assert!(matches!(
            check_economics(dec!(5), dec!(-1)),
            Err(StructureError::NonPositiveRisk { .. })
        ));
    }
}
