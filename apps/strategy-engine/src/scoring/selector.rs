//! Strategy selection: build every enabled structure, score the valid ones
//! and rank them.

use rayon::prelude::*;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, info_span, warn};

use super::scorer::StrategyScorer;
use super::types::{Rejection, ScoredStrategy};
use crate::config::{Config, TierBoundaries};
use crate::observability::record_strategy_selection;
use crate::options::OptionChainSnapshot;
use crate::strategy::{BuildRequest, StrategyBuilder, StrategyKind};
use crate::volatility::{DeltaTarget, VolatilityContext, adjust_delta};

/// Selection errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Every enabled builder produced an invalid candidate.
    #[error("No viable strategy for {symbol} ({} candidates rejected)", rejections.len())]
    NoViableStrategy {
        /// Underlying symbol.
        symbol: String,
        /// Why each candidate was rejected, in registration order.
        rejections: Vec<Rejection>,
    },
}

/// Inputs for one symbol.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    /// Underlying symbol.
    pub symbol: String,
    /// Underlying spot price.
    pub underlying_price: Decimal,
    /// Chain for the target expiry.
    pub chain: OptionChainSnapshot,
    /// Volatility context for the symbol.
    pub volatility: VolatilityContext,
    /// Contracts per candidate; the configured default when `None`.
    pub quantity: Option<u32>,
}

/// Outcome for one symbol of a batch.
#[derive(Debug, Clone)]
pub struct BatchSelection {
    /// Underlying symbol.
    pub symbol: String,
    /// Ranked strategies or the selection error.
    pub outcome: Result<Vec<ScoredStrategy>, SelectionError>,
}

/// Builds, scores and ranks strategies.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    builder: StrategyBuilder,
    scorer: StrategyScorer,
    enabled: Vec<StrategyKind>,
    tiers: TierBoundaries,
    default_quantity: u32,
}

impl StrategySelector {
    /// Create a selector from the root configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            builder: StrategyBuilder::from_config(config),
            scorer: StrategyScorer::new(config.scoring),
            enabled: config.selection.enabled.clone(),
            tiers: config.volatility.tiers,
            default_quantity: config.selection.default_quantity,
        }
    }

    /// Builders run by `score_all`, in order.
    #[must_use]
    pub fn enabled(&self) -> &[StrategyKind] {
        &self.enabled
    }

    /// Volatility-adjusted delta target for a kind.
    #[must_use]
    pub fn delta_target(&self, kind: StrategyKind, iv_rank: f64) -> DeltaTarget {
        let family = kind.family();
        adjust_delta(
            self.builder.strategies().family(family),
            &self.tiers,
            iv_rank,
            family,
        )
    }

    /// Score every valid candidate, ranked by descending score. Equal scores
    /// keep registration order.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::NoViableStrategy` when no candidate is valid.
    pub fn score_all(&self, request: &SelectionRequest) -> Result<Vec<ScoredStrategy>, SelectionError> {
        let _span = info_span!("score_all", symbol = %request.symbol).entered();
        let quantity = request.quantity.unwrap_or(self.default_quantity);

        let mut scored = Vec::with_capacity(self.enabled.len());
        let mut rejections = Vec::new();

        for &kind in &self.enabled {
            let build_request = BuildRequest {
                symbol: &request.symbol,
                underlying_price: request.underlying_price,
                chain: &request.chain,
                volatility: &request.volatility,
                target: self.delta_target(kind, request.volatility.iv_rank),
                quantity,
            };
            let candidate = self.builder.build(kind, &build_request);

            if let Some(reason) = candidate.invalid_reason() {
                warn!(symbol = %request.symbol, %kind, reason, "Discarding invalid candidate");
                rejections.push(Rejection {
                    kind,
                    reason: reason.to_string(),
                });
                continue;
            }

            match self.scorer.score(&candidate, candidate.tier) {
                Some(result) => scored.push(result),
                None => rejections.push(Rejection {
                    kind,
                    reason: "economics could not be scored".to_string(),
                }),
            }
        }

        if scored.is_empty() {
            warn!(
                symbol = %request.symbol,
                rejected = rejections.len(),
                "No viable strategy"
            );
            record_strategy_selection("no_viable", 0);
            return Err(SelectionError::NoViableStrategy {
                symbol: request.symbol.clone(),
                rejections,
            });
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        if let Some(top) = scored.first() {
            info!(
                symbol = %request.symbol,
                best = %top.kind(),
                score = top.score,
                candidates = scored.len(),
                "Ranked strategies"
            );
        }
        record_strategy_selection("selected", scored.len());

        Ok(scored)
    }

    /// Highest-scoring strategy.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::NoViableStrategy` when no candidate is valid.
    pub fn best(&self, request: &SelectionRequest) -> Result<ScoredStrategy, SelectionError> {
        let mut ranked = self.score_all(request)?;
        // score_all never returns an empty Ok
        Ok(ranked.swap_remove(0))
    }

    /// Score many symbols in parallel. Results keep the input order and one
    /// symbol's failure does not affect the others.
    #[must_use]
    pub fn score_batch(&self, requests: &[SelectionRequest]) -> Vec<BatchSelection> {
        requests
            .par_iter()
            .map(|request| BatchSelection {
                symbol: request.symbol.clone(),
                outcome: self.score_all(request),
            })
            .collect()
    }
}
