//! Log output and Prometheus listener settings.

use serde::{Deserialize, Serialize};

/// Logging and metrics settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// Subscriber settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Prometheus listener address (e.g. "0.0.0.0:9090"); disabled when unset.
    #[serde(default)]
    pub metrics_addr: Option<String>,
}

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line, human readable.
    Pretty,
    /// Single-line, human readable.
    Compact,
}

/// Subscriber settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `strategy_engine=debug,info`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Line encoding.
    #[serde(default)]
    pub format: LogFormat,
    /// Emit span close events with timings.
    #[serde(default = "default_include_spans")]
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            include_spans: default_include_spans(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_include_spans() -> bool {
    true
}
