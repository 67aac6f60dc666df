//! Engine-wide error type.
//!
//! Each module owns its error enum; `EngineError` collects them for callers
//! that cross module boundaries and maps every variant to a stable
//! `ErrorCode` reason string.
//!
//! | Code | Source |
//! |------|--------|
//! | `INVALID_CHAIN` | Snapshot invariant violation |
//! | `CHAIN_INCOMPLETE` | No quotes with a delta for a side |
//! | `STRIKE_NOT_FOUND` | No acceptable strike near the target |
//! | `INVALID_STRUCTURE` | Structure invariant violation |
//! | `NO_VIABLE_STRATEGY` | Every candidate was rejected |
//! | `INVALID_CONFIG` | Configuration read, parse or validation failure |
//! | `SYMBOL_NOT_FOUND` | Market data has no such symbol or expiry |
//! | `MARKET_DATA_UNAVAILABLE` | Market data connection or payload failure |
//! | `VOLATILITY_HISTORY_UNAVAILABLE` | IV history source failure |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{MarketDataError, VolatilityHistoryError};
use crate::config::ConfigError;
use crate::options::ChainError;
use crate::resolver::ResolveError;
use crate::scoring::SelectionError;
use crate::strategy::StructureError;

/// Stable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Snapshot invariant violation.
    InvalidChain,
    /// Chain lacks usable quotes for a side.
    ChainIncomplete,
    /// No acceptable strike near the target delta.
    StrikeNotFound,
    /// Structure invariant violation.
    InvalidStructure,
    /// Every candidate was rejected.
    NoViableStrategy,
    /// Configuration failure.
    InvalidConfig,
    /// Unknown symbol or expiry.
    SymbolNotFound,
    /// Market data failure.
    MarketDataUnavailable,
    /// IV history failure.
    VolatilityHistoryUnavailable,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidChain => "INVALID_CHAIN",
            Self::ChainIncomplete => "CHAIN_INCOMPLETE",
            Self::StrikeNotFound => "STRIKE_NOT_FOUND",
            Self::InvalidStructure => "INVALID_STRUCTURE",
            Self::NoViableStrategy => "NO_VIABLE_STRATEGY",
            Self::InvalidConfig => "INVALID_CONFIG",
            Self::SymbolNotFound => "SYMBOL_NOT_FOUND",
            Self::MarketDataUnavailable => "MARKET_DATA_UNAVAILABLE",
            Self::VolatilityHistoryUnavailable => "VOLATILITY_HISTORY_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Any error the engine can surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid chain snapshot.
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// Strike resolution failure.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Structure validation failure.
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// Selection failure.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Market data failure.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),
    /// IV history failure.
    #[error(transparent)]
    VolatilityHistory(#[from] VolatilityHistoryError),
}

impl EngineError {
    /// Stable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Chain(_) | Self::MarketData(MarketDataError::MalformedChain(_)) => {
                ErrorCode::InvalidChain
            }
            Self::Resolve(e) | Self::Structure(StructureError::Resolve(e)) => match e {
                ResolveError::ChainIncomplete { .. } => ErrorCode::ChainIncomplete,
                ResolveError::StrikeNotFound { .. } => ErrorCode::StrikeNotFound,
            },
            Self::Structure(_) => ErrorCode::InvalidStructure,
            Self::Selection(SelectionError::NoViableStrategy { .. }) => ErrorCode::NoViableStrategy,
            Self::Config(_) => ErrorCode::InvalidConfig,
            Self::MarketData(
                MarketDataError::SymbolNotFound { .. } | MarketDataError::ExpiryNotFound { .. },
            ) => ErrorCode::SymbolNotFound,
            Self::MarketData(_) => ErrorCode::MarketDataUnavailable,
            Self::VolatilityHistory(_) => ErrorCode::VolatilityHistoryUnavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionRight;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_code_reasons() {
        assert_eq!(ErrorCode::NoViableStrategy.reason(), "NO_VIABLE_STRATEGY");
        assert_eq!(ErrorCode::StrikeNotFound.to_string(), "STRIKE_NOT_FOUND");
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidChain).unwrap(),
            "\"INVALID_CHAIN\""
        );
    }

    #[test]
    fn test_nested_resolve_error_keeps_its_code() {
        let resolve = ResolveError::StrikeNotFound {
            right: OptionRight::Put,
            target: 0.18,
            closest: dec!(600),
            delta_error: 0.3,
        };
        let err = EngineError::from(StructureError::from(resolve.clone()));
        assert_eq!(err.code(), ErrorCode::StrikeNotFound);
        assert_eq!(err.to_string(), resolve.to_string());

        let err = EngineError::from(StructureError::DebitPreferred);
        assert_eq!(err.code(), ErrorCode::InvalidStructure);
        assert_eq!(err.to_string(), "low IV rank — credit structure not recommended");
    }

    #[test]
    fn test_market_data_codes() {
        let err = EngineError::from(MarketDataError::SymbolNotFound {
            symbol: "XYZ".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::SymbolNotFound);

        let err = EngineError::from(MarketDataError::ConnectionError {
            message: "timeout".to_string(),
        });
        assert_eq!(err.code(), ErrorCode::MarketDataUnavailable);
    }

    #[test]
    fn test_selection_code() {
        let err = EngineError::from(SelectionError::NoViableStrategy {
            symbol: "SPY".to_string(),
            rejections: Vec::new(),
        });
        assert_eq!(err.code(), ErrorCode::NoViableStrategy);
    }
}
