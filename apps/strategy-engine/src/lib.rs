// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::items_after_statements,
        clippy::suboptimal_flops
    )
)]

//! Strategy Engine - Rust Core Library
//!
//! Deterministic strike resolution and options strategy scoring.
//!
//! # Architecture
//!
//! ## Core (pure, synchronous)
//!
//! - `options`: Quote types and the strike-sorted chain snapshot
//! - `volatility`: IV rank, tiers, delta targets and the context cache
//! - `resolver`: Directed search for the strike nearest a target delta
//! - `strategy`: Iron condor, vertical and wheel builders with validation
//! - `scoring`: Composite scoring, ranking and batch selection
//!
//! ## Application
//!
//! - `ports`: `MarketDataPort` and `VolatilityHistoryPort`
//! - `use_cases`: `SelectStrategiesUseCase` for multi-symbol selection
//!
//! ## Infrastructure
//!
//! - In-memory adapters and JSON market fixtures
//!
//! ## Cross-cutting
//!
//! - `config`: YAML configuration with environment interpolation
//! - `observability`: Prometheus metrics and structured logging
//! - `error`: `EngineError` with stable error codes

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Core
// =============================================================================

/// Option quotes and chain snapshots.
pub mod options;

/// IV rank and delta targets.
pub mod volatility;

/// Delta-targeted strike resolution.
pub mod resolver;

/// Strategy structures and builders.
pub mod strategy;

/// Strategy scoring and selection.
pub mod scoring;

// =============================================================================
// Application and Infrastructure
// =============================================================================

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and fixtures.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Error codes and the engine-wide error type.
pub mod error;

/// Metrics and logging.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::ports::{
    MarketDataError, MarketDataPort, VolatilityHistoryError, VolatilityHistoryPort,
};
pub use application::use_cases::{SelectStrategiesUseCase, SelectionTarget, SymbolSelection};
pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use error::{EngineError, ErrorCode};
pub use infrastructure::{InMemoryMarketData, InMemoryVolatilityHistory, MarketFixture};
pub use options::{ChainError, OptionChainSnapshot, OptionQuote, OptionRight};
pub use resolver::{MatchQuality, ResolveError, ResolveParams, ResolvedStrike, resolve};
pub use scoring::{ScoredStrategy, SelectionError, SelectionRequest, StrategySelector};
pub use strategy::{
    BuildRequest, StrategyBuilder, StrategyCandidate, StrategyFamily, StrategyKind, Structure,
    StructureError,
};
pub use volatility::{
    DeltaTarget, VolTier, VolatilityCache, VolatilityContext, VolatilityContextProvider,
};
