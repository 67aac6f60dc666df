//! Volatility context value types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One implied volatility observation from the history source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvObservation {
    /// Observation date.
    pub date: NaiveDate,
    /// Annualized implied volatility (0.25 = 25%).
    pub iv: f64,
}

impl IvObservation {
    /// Create an observation.
    #[must_use]
    pub const fn new(date: NaiveDate, iv: f64) -> Self {
        Self { date, iv }
    }
}

/// How far the IV rank can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VolConfidence {
    /// Enough observations in the lookback window.
    Normal,
    /// Too few observations; the rank defaulted to the midpoint.
    Low,
}

/// IV rank and supporting data for one (symbol, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityContext {
    /// Underlying symbol.
    pub symbol: String,
    /// IV rank in [0, 100].
    pub iv_rank: f64,
    /// Latest observed IV in the window, if any.
    pub current_iv: Option<f64>,
    /// Observations used.
    pub observations: usize,
    /// Date the rank describes.
    pub as_of: NaiveDate,
    /// When the rank was computed.
    pub computed_at: DateTime<Utc>,
    /// Configured lookback window.
    pub lookback_days: u32,
    /// Confidence in the rank.
    pub confidence: VolConfidence,
}

impl VolatilityContext {
    /// Whether the rank fell back to the default because of thin history.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.confidence == VolConfidence::Low
    }
}
