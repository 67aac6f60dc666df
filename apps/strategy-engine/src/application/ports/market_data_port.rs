//! Market Data Port (Driven Port)
//!
//! Interface for fetching option chain snapshots and underlying prices from
//! external providers. This is a secondary/outbound port used by the
//! strategy selection use case.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::options::{ChainError, OptionChainSnapshot};

/// Market data error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarketDataError {
    /// Connection error.
    #[error("Market data connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Symbol not found.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// The unknown symbol.
        symbol: String,
    },

    /// No chain listed for the requested expiry.
    #[error("No {expiry} chain for {symbol}")]
    ExpiryNotFound {
        /// Underlying symbol.
        symbol: String,
        /// Requested expiry.
        expiry: NaiveDate,
    },

    /// Data unavailable.
    #[error("Market data unavailable: {message}")]
    DataUnavailable {
        /// Error details.
        message: String,
    },

    /// Provider returned a chain that violates snapshot invariants.
    #[error("Malformed chain: {0}")]
    MalformedChain(#[from] ChainError),
}

/// Port for chain snapshots and underlying prices.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Chain snapshot for one (symbol, expiry) taken at or before `as_of`.
    async fn chain_snapshot(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        as_of: DateTime<Utc>,
    ) -> Result<OptionChainSnapshot, MarketDataError>;

    /// Latest underlying price.
    async fn underlying_price(&self, symbol: &str) -> Result<Decimal, MarketDataError>;
}
