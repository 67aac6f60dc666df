//! Builder dispatch and the shared build context.
//!
//! Every `StrategyKind` maps to one builder function through a `match`; each
//! builder returns `Result<Built, StructureError>` and the dispatcher folds
//! that into a terminal `StrategyCandidate`.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::debug;

use super::candidate::{CandidateFlags, CandidateMetrics, CandidateStatus, StrategyCandidate};
use super::error::StructureError;
use super::leg::Structure;
use super::types::StrategyKind;
use super::{iron_condor, vertical, wheel};
use crate::config::{Config, FamilyConfig, ResolverConfig, StrategiesConfig};
use crate::observability::record_strategy_build;
use crate::options::{OptionChainSnapshot, OptionQuote, OptionRight};
use crate::resolver::{ResolveParams, ResolvedStrike, resolve};
use crate::volatility::{DeltaTarget, VolatilityContext};

/// Inputs for one builder run.
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    /// Underlying symbol.
    pub symbol: &'a str,
    /// Underlying price.
    pub underlying_price: Decimal,
    /// Chain snapshot for the target expiry.
    pub chain: &'a OptionChainSnapshot,
    /// Volatility context for the symbol.
    pub volatility: &'a VolatilityContext,
    /// Delta target for the kind's family.
    pub target: DeltaTarget,
    /// Contracts per leg.
    pub quantity: u32,
}

/// A structure that passed every check.
pub(crate) struct Built {
    pub structure: Structure,
    pub metrics: CandidateMetrics,
    pub low_match_confidence: bool,
}

/// Per-run view over the request, the family configuration and the
/// resolver parameters.
pub(crate) struct BuildContext<'a> {
    pub request: &'a BuildRequest<'a>,
    pub config: &'a FamilyConfig,
    pub params: ResolveParams,
}

impl BuildContext<'_> {
    /// Resolve a short strike at the adjusted target delta.
    pub fn resolve_short(&self, right: OptionRight) -> Result<ResolvedStrike, StructureError> {
        resolve(
            self.request.chain,
            right,
            self.request.target.adjusted_delta,
            &self.params,
        )
        .map_err(StructureError::from)
    }

    /// Target wing or spread width for the current underlying price.
    pub fn target_width(&self) -> Decimal {
        self.config.width.target_width(self.request.underlying_price)
    }

    /// Listed long strike one width further out of the money than the short.
    ///
    /// Ties between two listed strikes go to the wider one.
    pub fn place_wing(
        &self,
        short: &ResolvedStrike,
        width: Decimal,
    ) -> Result<&OptionQuote, StructureError> {
        let ideal = match short.right {
            OptionRight::Put => short.strike - width,
            OptionRight::Call => short.strike + width,
        };
        self.request
            .chain
            .nearest(short.right, ideal)
            .ok_or(StructureError::WingUnavailable {
                right: short.right,
                target: ideal,
            })
    }

    /// Build metrics common to every structure.
    pub fn metrics(
        &self,
        structure: &Structure,
        max_risk: Decimal,
        breakevens: Vec<Decimal>,
    ) -> CandidateMetrics {
        CandidateMetrics {
            net_credit: structure.net_credit(),
            max_risk,
            put_wing_width: None,
            call_wing_width: None,
            spread_width: None,
            delta_balance: None,
            breakevens,
            max_short_delta: structure.max_short_delta(),
            net_delta: structure.net_delta(),
        }
    }
}

/// Dispatches build requests to the per-kind builders.
#[derive(Debug, Clone)]
pub struct StrategyBuilder {
    strategies: StrategiesConfig,
    resolver: ResolverConfig,
    contract_multiplier: u32,
}

impl StrategyBuilder {
    /// Create a builder.
    #[must_use]
    pub const fn new(
        strategies: StrategiesConfig,
        resolver: ResolverConfig,
        contract_multiplier: u32,
    ) -> Self {
        Self {
            strategies,
            resolver,
            contract_multiplier,
        }
    }

    /// Create a builder from the root configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.strategies.clone(),
            config.resolver,
            config.selection.contract_multiplier,
        )
    }

    /// Family configuration.
    #[must_use]
    pub const fn strategies(&self) -> &StrategiesConfig {
        &self.strategies
    }

    /// Resolver parameters for a request.
    ///
    /// Uses the chain's at-the-money IV, falling back to the latest IV in the
    /// volatility context. With neither the first pivot sits at the underlying.
    #[must_use]
    pub fn resolve_params(&self, request: &BuildRequest<'_>) -> ResolveParams {
        let implied_vol = request
            .chain
            .atm_implied_vol(request.underlying_price)
            .or(request.volatility.current_iv)
            .unwrap_or(0.0);
        ResolveParams::from_config(
            request.underlying_price,
            implied_vol,
            request.chain.days_to_expiry(),
            &self.resolver,
        )
    }

    /// Build and validate one structure. Never fails: rejections come back as
    /// an invalid candidate.
    #[must_use]
    pub fn build(&self, kind: StrategyKind, request: &BuildRequest<'_>) -> StrategyCandidate {
        let started = Instant::now();
        let ctx = BuildContext {
            request,
            config: self.strategies.family(kind.family()),
            params: self.resolve_params(request),
        };

        let outcome = Self::check_request(kind, request).and_then(|()| match kind {
            StrategyKind::IronCondor => iron_condor::build(&ctx),
            StrategyKind::BullPutSpread => vertical::build(&ctx, OptionRight::Put),
            StrategyKind::BearCallSpread => vertical::build(&ctx, OptionRight::Call),
            StrategyKind::CashSecuredPut => wheel::build(&ctx, OptionRight::Put),
            StrategyKind::CoveredCall => wheel::build(&ctx, OptionRight::Call),
        });

        let mut flags = CandidateFlags {
            low_match_confidence: false,
            low_volatility_confidence: request.volatility.is_low_confidence(),
        };

        let status = match outcome {
            Ok(built) => {
                flags.low_match_confidence = built.low_match_confidence;
                debug!(
                    symbol = request.symbol,
                    %kind,
                    net_credit = %built.metrics.net_credit,
                    max_risk = %built.metrics.max_risk,
                    "Built candidate"
                );
                CandidateStatus::Valid {
                    structure: built.structure,
                    metrics: built.metrics,
                }
            }
            Err(e) => {
                debug!(symbol = request.symbol, %kind, reason = %e, "Candidate rejected");
                CandidateStatus::Invalid {
                    reason: e.to_string(),
                }
            }
        };

        let outcome_label = if matches!(status, CandidateStatus::Valid { .. }) {
            "valid"
        } else {
            "invalid"
        };
        record_strategy_build(
            &kind.to_string(),
            outcome_label,
            started.elapsed().as_secs_f64(),
        );

        StrategyCandidate {
            kind,
            symbol: request.symbol.to_string(),
            underlying_price: request.underlying_price,
            quantity: request.quantity,
            contract_multiplier: self.contract_multiplier,
            tier: request.target.tier,
            status,
            flags,
        }
    }

    fn check_request(kind: StrategyKind, request: &BuildRequest<'_>) -> Result<(), StructureError> {
        if request.target.family != kind.family() {
            return Err(StructureError::FamilyMismatch {
                expected: kind.family(),
                found: request.target.family,
            });
        }
        if request.target.prefer_debit {
            return Err(StructureError::DebitPreferred);
        }
        if request.quantity == 0 {
            return Err(StructureError::InvalidQuantity);
        }
        Ok(())
    }
}
