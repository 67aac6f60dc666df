//! Strike resolution errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::options::OptionRight;

/// Errors from strike resolution.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// The chain cannot support a search for this right.
    #[error("Option chain incomplete for {right}: {message}")]
    ChainIncomplete {
        /// Right being resolved.
        right: OptionRight,
        /// What is missing.
        message: String,
    },

    /// No listed strike is close enough to the target delta.
    #[error(
        "No {right} strike near target delta {target:.2} (closest {closest} off by {delta_error:.3})"
    )]
    StrikeNotFound {
        /// Right being resolved.
        right: OptionRight,
        /// Target delta magnitude.
        target: f64,
        /// Closest strike the search ended on.
        closest: Decimal,
        /// Its delta error.
        delta_error: f64,
    },
}
