//! Volatility History Port (Driven Port)
//!
//! Interface for reading the daily implied volatility series used to
//! compute IV rank.

use chrono::NaiveDate;

use crate::volatility::IvObservation;

/// Volatility history error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VolatilityHistoryError {
    /// Source could not be reached or returned garbage.
    #[error("IV history unavailable for {symbol}: {message}")]
    Unavailable {
        /// Requested symbol.
        symbol: String,
        /// Error details.
        message: String,
    },
}

/// Source of historical implied volatility.
///
/// Implementations return observations for `symbol` covering at least the
/// `lookback_days` trading days ending at `as_of`. Ordering is not required.
#[cfg_attr(test, mockall::automock)]
pub trait VolatilityHistoryPort: Send + Sync {
    /// Fetch the IV series.
    fn iv_series(
        &self,
        symbol: &str,
        as_of: NaiveDate,
        lookback_days: u32,
    ) -> Result<Vec<IvObservation>, VolatilityHistoryError>;
}
