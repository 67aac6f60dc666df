//! Observability module for metrics and logging.
//!
//! This module provides instrumentation for the strategy engine, including
//! Prometheus metrics export and structured logging.

mod logging;
mod metrics;

pub use logging::{LoggingError, env_filter, init_logging};
pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_strategy_build, record_strategy_selection,
    record_strike_resolution, record_volatility_cache_lookup,
};
