//! Volatility Context Provider.
//!
//! Turns a daily IV series into an IV rank and the rank into per-family
//! delta targets. Thin or missing history never fails: the rank falls back to
//! the midpoint and the context is marked low confidence.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use super::cache::VolatilityCache;
use super::context::{VolConfidence, VolatilityContext};
use super::rank::{DEFAULT_IV_RANK, iv_rank, trailing_window};
use super::tiers::{DeltaTarget, adjust_delta};
use crate::application::ports::VolatilityHistoryPort;
use crate::config::{FamilyConfig, TierBoundaries, VolatilityConfig};
use crate::strategy::StrategyFamily;

/// Computes cached volatility contexts from an injected history source.
pub struct VolatilityContextProvider<H: VolatilityHistoryPort + ?Sized> {
    history: Arc<H>,
    config: VolatilityConfig,
    cache: Arc<VolatilityCache>,
}

impl<H: VolatilityHistoryPort + ?Sized> VolatilityContextProvider<H> {
    /// Create a provider.
    pub const fn new(history: Arc<H>, config: VolatilityConfig, cache: Arc<VolatilityCache>) -> Self {
        Self {
            history,
            config,
            cache,
        }
    }

    /// Configured tier boundaries.
    pub const fn tiers(&self) -> &TierBoundaries {
        &self.config.tiers
    }

    /// Shared cache.
    pub fn cache(&self) -> &Arc<VolatilityCache> {
        &self.cache
    }

    /// Volatility context for (symbol, as_of), served from the cache when present.
    pub fn compute_context(&self, symbol: &str, as_of: NaiveDate) -> VolatilityContext {
        self.cache
            .get_or_compute(symbol, as_of, || self.compute_uncached(symbol, as_of))
    }

    /// Delta target for a family at the given IV rank.
    pub fn adjust_delta(
        &self,
        family_config: &FamilyConfig,
        iv_rank: f64,
        family: StrategyFamily,
    ) -> DeltaTarget {
        adjust_delta(family_config, &self.config.tiers, iv_rank, family)
    }

    fn compute_uncached(&self, symbol: &str, as_of: NaiveDate) -> VolatilityContext {
        let lookback = self.config.lookback_days;

        let series = match self.history.iv_series(symbol, as_of, lookback) {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol, %as_of, error = %e, "IV history unavailable, using default rank");
                Vec::new()
            }
        };

        let window = trailing_window(&series, as_of, lookback as usize);
        let current_iv = window.last().map(|obs| obs.iv);

        let (rank, confidence) = if window.len() < self.config.min_observations {
            warn!(
                symbol,
                %as_of,
                observations = window.len(),
                required = self.config.min_observations,
                "Insufficient IV history, defaulting IV rank"
            );
            (DEFAULT_IV_RANK, VolConfidence::Low)
        } else {
            match iv_rank(&window) {
                Some(rank) => (rank, VolConfidence::Normal),
                None => (DEFAULT_IV_RANK, VolConfidence::Low),
            }
        };

        debug!(symbol, %as_of, iv_rank = rank, ?current_iv, "Computed volatility context");

        VolatilityContext {
            symbol: symbol.to_string(),
            iv_rank: rank,
            current_iv,
            observations: window.len(),
            as_of,
            computed_at: Utc::now(),
            lookback_days: lookback,
            confidence,
        }
    }
}
