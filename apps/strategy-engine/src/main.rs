//! Strategy Engine Binary
//!
//! Ranks option strategies for every symbol in a market fixture and prints
//! the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! STRATEGY_ENGINE_FIXTURE=apps/strategy-engine/fixtures/spy.json cargo run --bin strategy-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `STRATEGY_ENGINE_FIXTURE`: Path to a JSON market fixture
//!
//! ## Optional
//! - `STRATEGY_ENGINE_CONFIG`: Path to the YAML config (default: `config.yaml` if present)
//! - `METRICS_ADDR`: Prometheus listener address, overrides `observability.metrics_addr`
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use strategy_engine::config::{Config, load_config};
use strategy_engine::observability::{MetricsConfig, init_logging, init_metrics};
use strategy_engine::{
    ErrorCode, MarketFixture, ScoredStrategy, SelectStrategiesUseCase, StrategySelector,
    SymbolSelection, VolatilityCache, VolatilityContextProvider, VolatilityHistoryPort,
};

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Serialize)]
struct ErrorReport {
    code: ErrorCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct SymbolReport {
    symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategies: Option<Vec<ScoredStrategy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

impl From<SymbolSelection> for SymbolReport {
    fn from(selection: SymbolSelection) -> Self {
        match selection.outcome {
            Ok(strategies) => Self {
                symbol: selection.symbol,
                strategies: Some(strategies),
                error: None,
            },
            Err(e) => Self {
                symbol: selection.symbol,
                strategies: None,
                error: Some(ErrorReport {
                    code: e.code(),
                    message: e.to_string(),
                }),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_engine_config()?;
    init_logging(&config.observability.logging)?;

    tracing::info!("Starting Strategy Engine");

    if let Some(addr) = metrics_addr(&config) {
        init_metrics(&MetricsConfig::from_addr_str(&addr)?)?;
    }

    let fixture_path = std::env::var("STRATEGY_ENGINE_FIXTURE")
        .context("STRATEGY_ENGINE_FIXTURE must point to a market fixture")?;
    let fixture = MarketFixture::load(&fixture_path)?;
    tracing::info!(
        fixture = %fixture_path,
        symbols = fixture.symbols.len(),
        as_of = %fixture.as_of,
        "Loaded market fixture"
    );

    let history: Arc<dyn VolatilityHistoryPort> = Arc::new(fixture.volatility_history());
    let provider = VolatilityContextProvider::new(
        history,
        config.volatility.clone(),
        Arc::new(VolatilityCache::new()),
    );
    let use_case = SelectStrategiesUseCase::new(
        Arc::new(fixture.market_data()),
        provider,
        Arc::new(StrategySelector::new(&config)),
    );

    let results = use_case.execute(&fixture.targets(), fixture.as_of).await;
    let report: Vec<SymbolReport> = results.into_iter().map(SymbolReport::from).collect();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Explicit path from the environment, else `config.yaml` if present, else defaults.
fn load_engine_config() -> anyhow::Result<Config> {
    if let Ok(path) = std::env::var("STRATEGY_ENGINE_CONFIG") {
        return load_config(Some(&path)).with_context(|| format!("loading config from {path}"));
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return Ok(load_config(None)?);
    }
    Ok(Config::default())
}

fn metrics_addr(config: &Config) -> Option<String> {
    std::env::var("METRICS_ADDR")
        .ok()
        .filter(|addr| !addr.is_empty())
        .or_else(|| config.observability.metrics_addr.clone())
}
