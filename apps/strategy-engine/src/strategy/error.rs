//! Structure construction errors.
//!
//! Builders never surface these to callers; each becomes the reason string of
//! an invalid candidate.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::StrategyFamily;
use crate::options::OptionRight;
use crate::resolver::ResolveError;

/// Why a structure could not be built.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StructureError {
    /// IV rank is in the LOW tier.
    #[error("low IV rank — credit structure not recommended")]
    DebitPreferred,

    /// Zero contracts requested.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// Delta target was computed for another family.
    #[error("delta target for {found} cannot drive a {expected} structure")]
    FamilyMismatch {
        /// Family of the requested kind.
        expected: StrategyFamily,
        /// Family of the supplied target.
        found: StrategyFamily,
    },

    /// Short put and short call landed on one strike.
    #[error("short put and short call resolved to the same strike {strike}")]
    StrikeCollision {
        /// Shared strike.
        strike: Decimal,
    },

    /// Legs are not strictly ordered by strike.
    #[error("legs out of order: {message}")]
    InvalidOrdering {
        /// Offending strikes.
        message: String,
    },

    /// Put and call short deltas differ too much.
    #[error("delta imbalance {balance:.3} exceeds tolerance {tolerance:.3}")]
    DeltaImbalance {
        /// |abs(put delta) - abs(call delta)|.
        balance: f64,
        /// Configured tolerance.
        tolerance: f64,
    },

    /// A realised width is too far from its target.
    #[error("{wing} width {actual} deviates from target {target} by more than {tolerance}")]
    WidthOutOfTolerance {
        /// Which width.
        wing: &'static str,
        /// Width between listed strikes.
        actual: Decimal,
        /// Target width.
        target: Decimal,
        /// Allowed deviation.
        tolerance: Decimal,
    },

    /// Single-leg short delta outside the family band.
    #[error("short delta {delta:.3} outside acceptable band [{min:.2}, {max:.2}]")]
    DeltaOutsideBand {
        /// Absolute resolved delta.
        delta: f64,
        /// Band lower bound.
        min: f64,
        /// Band upper bound.
        max: f64,
    },

    /// No listed strike for a long leg.
    #[error("no {right} strike listed near {target} for the long leg")]
    WingUnavailable {
        /// Right of the wing.
        right: OptionRight,
        /// Ideal wing strike.
        target: Decimal,
    },

    /// Structure does not collect premium.
    #[error("net credit {credit} is not positive")]
    NonPositiveCredit {
        /// Short mids minus long mids.
        credit: Decimal,
    },

    /// Structure has no defined loss.
    #[error("max risk {risk} is not positive")]
    NonPositiveRisk {
        /// Computed max risk.
        risk: Decimal,
    },

    /// Short strike resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
