//! JSON market fixtures.
//!
//! A fixture bundles, per symbol, the underlying price, one chain snapshot
//! and an optional IV history:
//!
//! ```json
//! {
//!   "as_of": "2026-10-14T15:00:00Z",
//!   "symbols": [
//!     {
//!       "symbol": "SPY",
//!       "underlying_price": "695",
//!       "chain": { "symbol": "SPY", "expiry": "2026-11-13", "as_of": "...", "quotes": [] },
//!       "iv_history": [{ "date": "2026-10-13", "iv": 0.19 }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{InMemoryMarketData, InMemoryVolatilityHistory};
use crate::application::use_cases::SelectionTarget;
use crate::options::OptionChainSnapshot;
use crate::volatility::IvObservation;

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Failed to read the fixture file.
    #[error("Failed to read fixture '{path}': {source}")]
    ReadError {
        /// File path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Invalid JSON or an invalid chain snapshot.
    #[error("Failed to parse fixture: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Market data for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolFixture {
    /// Underlying symbol.
    pub symbol: String,
    /// Underlying spot price.
    pub underlying_price: Decimal,
    /// Chain snapshot; its expiry is the selection expiry.
    pub chain: OptionChainSnapshot,
    /// Daily IV observations.
    #[serde(default)]
    pub iv_history: Vec<IvObservation>,
    /// Contracts per candidate.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// A full market fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketFixture {
    /// Evaluation time.
    pub as_of: DateTime<Utc>,
    /// Per-symbol data, in selection order.
    pub symbols: Vec<SymbolFixture>,
}

impl MarketFixture {
    /// Parse a fixture from JSON.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a fixture file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| FixtureError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Market data adapter seeded with every symbol's chain and price.
    #[must_use]
    pub fn market_data(&self) -> InMemoryMarketData {
        let market_data = InMemoryMarketData::new();
        for entry in &self.symbols {
            market_data.insert_chain(entry.chain.clone());
            market_data.set_price(&entry.symbol, entry.underlying_price);
        }
        market_data
    }

    /// IV history adapter. Symbols without history are left out so the
    /// provider reports them as unavailable.
    #[must_use]
    pub fn volatility_history(&self) -> InMemoryVolatilityHistory {
        let history = InMemoryVolatilityHistory::new();
        for entry in self.symbols.iter().filter(|e| !e.iv_history.is_empty()) {
            history.insert(&entry.symbol, entry.iv_history.clone());
        }
        history
    }

    /// Selection targets in fixture order.
    #[must_use]
    pub fn targets(&self) -> Vec<SelectionTarget> {
        self.symbols
            .iter()
            .map(|entry| SelectionTarget {
                symbol: entry.symbol.clone(),
                expiry: entry.chain.expiry(),
                quantity: entry.quantity,
            })
            .collect()
    }
}
