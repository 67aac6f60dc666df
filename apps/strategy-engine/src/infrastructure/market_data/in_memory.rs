//! In-memory market data for tests and fixtures.

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::application::ports::{MarketDataError, MarketDataPort};
use crate::options::OptionChainSnapshot;

#[derive(Debug, Default)]
struct SymbolData {
    price: Option<Decimal>,
    chains: BTreeMap<NaiveDate, OptionChainSnapshot>,
}

/// In-memory implementation of `MarketDataPort`.
///
/// Holds one snapshot per (symbol, expiry). Suitable for testing and
/// fixture-driven runs.
#[derive(Debug, Default)]
pub struct InMemoryMarketData {
    symbols: RwLock<HashMap<String, SymbolData>>,
}

impl InMemoryMarketData {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the snapshot for the chain's (symbol, expiry).
    pub fn insert_chain(&self, chain: OptionChainSnapshot) {
        let mut symbols = self.symbols.write().unwrap_or_else(PoisonError::into_inner);
        symbols
            .entry(chain.symbol().to_string())
            .or_default()
            .chains
            .insert(chain.expiry(), chain);
    }

    /// Set the underlying price for a symbol.
    pub fn set_price(&self, symbol: &str, price: Decimal) {
        let mut symbols = self.symbols.write().unwrap_or_else(PoisonError::into_inner);
        symbols.entry(symbol.to_string()).or_default().price = Some(price);
    }

    /// Number of symbols with any data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MarketDataPort for InMemoryMarketData {
    async fn chain_snapshot(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        as_of: DateTime<Utc>,
    ) -> Result<OptionChainSnapshot, MarketDataError> {
        let symbols = self.symbols.read().unwrap_or_else(PoisonError::into_inner);
        let data = symbols.get(symbol).ok_or_else(|| MarketDataError::SymbolNotFound {
            symbol: symbol.to_string(),
        })?;
        let chain = data
            .chains
            .get(&expiry)
            .ok_or_else(|| MarketDataError::ExpiryNotFound {
                symbol: symbol.to_string(),
                expiry,
            })?;
        if chain.as_of() > as_of {
            return Err(MarketDataError::DataUnavailable {
                message: format!(
                    "{symbol} {expiry} snapshot taken at {} is after {as_of}",
                    chain.as_of()
                ),
            });
        }
        Ok(chain.clone())
    }

    async fn underlying_price(&self, symbol: &str) -> Result<Decimal, MarketDataError> {
        let symbols = self.symbols.read().unwrap_or_else(PoisonError::into_inner);
        symbols
            .get(symbol)
            .and_then(|data| data.price)
            .ok_or_else(|| MarketDataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}
