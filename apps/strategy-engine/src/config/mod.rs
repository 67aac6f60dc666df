//! Configuration module for the strategy engine.
//!
//! Provides typed configuration loading, validation, and environment
//! variable interpolation. Tier boundaries, per-family delta ranges, widths
//! and tolerances are all loaded here and passed explicitly into the
//! volatility provider, resolver and builders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Access configuration values
//! println!("lookback: {}", config.volatility.lookback_days);
//! ```

mod observability;
mod resolver;
mod scoring;
mod selection;
mod strategies;
mod volatility;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use resolver::ResolverConfig;
pub use scoring::{ScoreWeights, ScoringConfig};
pub use selection::SelectionConfig;
pub use strategies::{DeltaRange, FamilyConfig, StrategiesConfig, TierDeltas, WidthConfig};
pub use volatility::{TierBoundaries, VolatilityConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// IV rank window and tier boundaries.
    #[serde(default)]
    pub volatility: VolatilityConfig,
    /// Per-family strategy tuning.
    #[serde(default)]
    pub strategies: StrategiesConfig,
    /// Strike resolver tolerances.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Composite score weights.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Enabled builders and sizing.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match caps.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` describing the first violated rule.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_volatility(&config.volatility)?;
    validate_resolver(&config.resolver)?;
    validate_scoring(&config.scoring)?;

    for (family, family_config) in config.strategies.iter() {
        validate_family(&family.to_string(), family_config)?;
    }

    if config.selection.enabled.is_empty() {
        return Err(invalid("selection.enabled must list at least one strategy"));
    }
    if config.selection.contract_multiplier == 0 {
        return Err(invalid("selection.contract_multiplier must be positive"));
    }
    if config.selection.default_quantity == 0 {
        return Err(invalid("selection.default_quantity must be positive"));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

fn validate_volatility(config: &VolatilityConfig) -> Result<(), ConfigError> {
    if config.lookback_days == 0 {
        return Err(invalid("volatility.lookback_days must be positive"));
    }
    if config.min_observations < 2 {
        return Err(invalid("volatility.min_observations must be at least 2"));
    }

    // Tiers must not overlap: 100 > very_high > high > moderate > 0
    let t = &config.tiers;
    let ordered = 100.0 > t.very_high && t.very_high > t.high && t.high > t.moderate && t.moderate > 0.0;
    if !ordered {
        return Err(invalid(format!(
            "volatility.tiers must satisfy 100 > very_high > high > moderate > 0 (got {}/{}/{})",
            t.very_high, t.high, t.moderate
        )));
    }
    Ok(())
}

fn validate_resolver(config: &ResolverConfig) -> Result<(), ConfigError> {
    if config.tolerance <= 0.0 || config.tolerance >= 1.0 {
        return Err(invalid("resolver.tolerance must be in (0, 1)"));
    }
    if config.max_iterations == 0 {
        return Err(invalid("resolver.max_iterations must be positive"));
    }
    if config.max_fallback_error < config.tolerance {
        return Err(invalid(
            "resolver.max_fallback_error must be at least resolver.tolerance",
        ));
    }
    Ok(())
}

fn validate_scoring(config: &ScoringConfig) -> Result<(), ConfigError> {
    let w = &config.weights;
    if [w.risk_reward, w.probability_of_success, w.expected_return, w.vol_context]
        .iter()
        .any(|v| *v < 0.0)
    {
        return Err(invalid("scoring.weights must be non-negative"));
    }
    if (w.total() - 1.0).abs() > 1e-9 {
        return Err(invalid(format!(
            "scoring.weights must sum to 1.0 (got {:.4})",
            w.total()
        )));
    }
    if config.risk_reward_ceiling <= 1.0 {
        return Err(invalid("scoring.risk_reward_ceiling must be greater than 1"));
    }
    if config.expected_return_ceiling <= 0.0 {
        return Err(invalid("scoring.expected_return_ceiling must be positive"));
    }
    Ok(())
}

fn validate_family(name: &str, config: &FamilyConfig) -> Result<(), ConfigError> {
    let in_unit = |v: f64| v > 0.0 && v < 1.0;

    if !in_unit(config.base_delta) {
        return Err(invalid(format!("{name}.base_delta must be in (0, 1)")));
    }

    let ranges = [
        ("tier_deltas.very_high", config.tier_deltas.very_high),
        ("tier_deltas.high", config.tier_deltas.high),
        ("tier_deltas.moderate", config.tier_deltas.moderate),
        ("acceptable_band", config.acceptable_band),
    ];
    for (field, range) in ranges {
        if !in_unit(range.min) || !in_unit(range.max) || range.min > range.max {
            return Err(invalid(format!(
                "{name}.{field} must satisfy 0 < min <= max < 1 (got {}..{})",
                range.min, range.max
            )));
        }
    }

    let width = &config.width;
    if width.target_pct < 0.0 || width.min_points < 0.0 || width.min_points > width.max_points {
        return Err(invalid(format!(
            "{name}.width must satisfy target_pct >= 0 and 0 <= min_points <= max_points"
        )));
    }
    if config.balance_tolerance <= 0.0 || config.width_tolerance < 0.0 {
        return Err(invalid(format!(
            "{name} tolerances must be positive (balance) and non-negative (width)"
        )));
    }
    Ok(())
}
