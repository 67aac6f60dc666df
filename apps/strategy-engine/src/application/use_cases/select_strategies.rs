//! Select Strategies Use Case

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::application::ports::{MarketDataError, MarketDataPort, VolatilityHistoryPort};
use crate::error::EngineError;
use crate::scoring::{ScoredStrategy, SelectionRequest, StrategySelector};
use crate::volatility::VolatilityContextProvider;

/// One symbol to select strategies for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTarget {
    /// Underlying symbol.
    pub symbol: String,
    /// Option expiry to trade.
    pub expiry: NaiveDate,
    /// Contracts per candidate; the configured default when unset.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl SelectionTarget {
    /// Create a target with the default quantity.
    pub fn new(symbol: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            expiry,
            quantity: None,
        }
    }
}

/// Outcome for one symbol.
#[derive(Debug)]
pub struct SymbolSelection {
    /// Underlying symbol.
    pub symbol: String,
    /// Ranked strategies, or why none could be produced.
    pub outcome: Result<Vec<ScoredStrategy>, EngineError>,
}

/// Use case for ranking strategies across many symbols.
pub struct SelectStrategiesUseCase<M>
where
    M: MarketDataPort,
{
    market_data: Arc<M>,
    volatility: VolatilityContextProvider<dyn VolatilityHistoryPort>,
    selector: Arc<StrategySelector>,
}

impl<M> SelectStrategiesUseCase<M>
where
    M: MarketDataPort,
{
    /// Create a new `SelectStrategiesUseCase`.
    pub const fn new(
        market_data: Arc<M>,
        volatility: VolatilityContextProvider<dyn VolatilityHistoryPort>,
        selector: Arc<StrategySelector>,
    ) -> Self {
        Self {
            market_data,
            volatility,
            selector,
        }
    }

    /// Fetch every target's chain and price concurrently, then rank each
    /// symbol. Output order matches `targets`; failures stay per symbol.
    #[instrument(skip_all, fields(symbols = targets.len(), %as_of))]
    pub async fn execute(&self, targets: &[SelectionTarget], as_of: DateTime<Utc>) -> Vec<SymbolSelection> {
        let fetched = join_all(targets.iter().map(|target| self.fetch(target, as_of))).await;

        let mut outcomes: Vec<Option<Result<Vec<ScoredStrategy>, EngineError>>> =
            Vec::with_capacity(targets.len());
        let mut requests = Vec::new();
        let mut slots = Vec::new();

        for (index, result) in fetched.into_iter().enumerate() {
            match result {
                Ok(request) => {
                    slots.push(index);
                    requests.push(request);
                    outcomes.push(None);
                }
                Err(e) => {
                    warn!(symbol = %targets[index].symbol, error = %e, "Market data failed");
                    outcomes.push(Some(Err(e.into())));
                }
            }
        }

        for (slot, batch) in slots.into_iter().zip(self.selector.score_batch(&requests)) {
            outcomes[slot] = Some(batch.outcome.map_err(EngineError::from));
        }

        targets
            .iter()
            .zip(outcomes)
            .filter_map(|(target, outcome)| {
                outcome.map(|outcome| SymbolSelection {
                    symbol: target.symbol.clone(),
                    outcome,
                })
            })
            .collect()
    }

    async fn fetch(
        &self,
        target: &SelectionTarget,
        as_of: DateTime<Utc>,
    ) -> Result<SelectionRequest, MarketDataError> {
        let symbol = target.symbol.as_str();
        let (chain, underlying_price) = futures::try_join!(
            self.market_data.chain_snapshot(symbol, target.expiry, as_of),
            self.market_data.underlying_price(symbol),
        )?;

        if chain.expiry() != target.expiry {
            return Err(MarketDataError::ExpiryNotFound {
                symbol: symbol.to_string(),
                expiry: target.expiry,
            });
        }

        let volatility = self.volatility.compute_context(symbol, as_of.date_naive());

        Ok(SelectionRequest {
            symbol: target.symbol.clone(),
            underlying_price,
            chain,
            volatility,
            quantity: target.quantity,
        })
    }
}
