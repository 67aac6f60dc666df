//! Prometheus metrics for the strategy engine.
//!
//! Covers strike resolution, strategy construction, selection outcomes and
//! the volatility cache.
//!
//! # Example
//!
//! ```ignore
//! use strategy_engine::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("Failed to initialize metrics");
//!
//! record_strike_resolution("PUT", "converged", 3);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // Latency buckets from 10us to 100ms
            latency_buckets: vec![
                0.000_01, 0.000_05, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }

    /// Parse a listen address such as `"0.0.0.0:9090"`.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::Configuration` if the address does not parse.
    pub fn from_addr_str(addr: &str) -> Result<Self, MetricsError> {
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| MetricsError::Configuration(format!("invalid metrics address {addr}: {e}")))?;
        Ok(Self::with_addr(addr))
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Strike Resolution Metrics
// ============================================================================

/// Record one strike resolution.
///
/// # Arguments
///
/// * `right` - Option right ("PUT", "CALL")
/// * `outcome` - "converged", `"closest_available"`, `"strike_not_found"` or `"chain_incomplete"`
/// * `iterations` - Search iterations used
pub fn record_strike_resolution(right: &str, outcome: &str, iterations: u32) {
    counter!(
        "strike_resolutions_total",
        "right" => right.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "strike_resolution_iterations",
        "right" => right.to_string()
    )
    .record(f64::from(iterations));
}

// ============================================================================
// Strategy Metrics
// ============================================================================

/// Record a strategy build.
///
/// # Arguments
///
/// * `kind` - Strategy kind (e.g., `"IRON_CONDOR"`)
/// * `outcome` - "valid" or "invalid"
/// * `duration_seconds` - Build time in seconds
pub fn record_strategy_build(kind: &str, outcome: &str, duration_seconds: f64) {
    counter!(
        "strategy_builds_total",
        "kind" => kind.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "strategy_build_seconds",
        "kind" => kind.to_string()
    )
    .record(duration_seconds);
}

/// Record a per-symbol selection.
///
/// # Arguments
///
/// * `outcome` - "selected" or `"no_viable"`
/// * `candidates` - Number of scored candidates
pub fn record_strategy_selection(outcome: &str, candidates: usize) {
    counter!(
        "strategy_selections_total",
        "outcome" => outcome.to_string()
    )
    .increment(1);

    #[allow(clippy::cast_precision_loss)]
    histogram!("strategy_selection_candidates").record(candidates as f64);
}

// ============================================================================
// Volatility Metrics
// ============================================================================

/// Record a volatility cache lookup.
pub fn record_volatility_cache_lookup(hit: bool) {
    counter!(
        "volatility_cache_lookups_total",
        "result" => if hit { "hit" } else { "miss" }
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn test_config_from_addr_str() {
        let config = MetricsConfig::from_addr_str("127.0.0.1:8080").unwrap();
        assert_eq!(config.listen_addr.port(), 8080);

        let Err(err) = MetricsConfig::from_addr_str("not-an-address") else {
            panic!("expected error");
        };
        assert!(err.to_string().contains("invalid metrics address"));
    }

    #[test]
    fn test_latency_buckets_ascending() {
        let config = MetricsConfig::default();
        for pair in config.latency_buckets.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_record_functions_without_recorder() {
        // Recording without an installed recorder is a no-op
        record_strike_resolution("PUT", "converged", 3);
        record_strategy_build("IRON_CONDOR", "valid", 0.0002);
        record_strategy_selection("selected", 4);
        record_volatility_cache_lookup(true);
        record_volatility_cache_lookup(false);
    }
}
