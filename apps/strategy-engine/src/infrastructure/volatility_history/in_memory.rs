//! In-memory IV history.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use crate::application::ports::{VolatilityHistoryError, VolatilityHistoryPort};
use crate::volatility::IvObservation;

/// In-memory implementation of `VolatilityHistoryPort`.
#[derive(Debug, Default)]
pub struct InMemoryVolatilityHistory {
    series: RwLock<HashMap<String, Vec<IvObservation>>>,
}

impl InMemoryVolatilityHistory {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series for a symbol. Observations are kept date-ordered.
    pub fn insert(&self, symbol: &str, mut observations: Vec<IvObservation>) {
        observations.sort_by_key(|obs| obs.date);
        self.series
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(symbol.to_string(), observations);
    }
}

impl VolatilityHistoryPort for InMemoryVolatilityHistory {
    fn iv_series(
        &self,
        symbol: &str,
        as_of: NaiveDate,
        lookback_days: u32,
    ) -> Result<Vec<IvObservation>, VolatilityHistoryError> {
        let series = self.series.read().unwrap_or_else(PoisonError::into_inner);
        let observations = series
            .get(symbol)
            .ok_or_else(|| VolatilityHistoryError::Unavailable {
                symbol: symbol.to_string(),
                message: "no IV history recorded".to_string(),
            })?;

        let eligible: Vec<IvObservation> = observations
            .iter()
            .filter(|obs| obs.date <= as_of)
            .copied()
            .collect();
        let skip = eligible.len().saturating_sub(lookback_days as usize);
        Ok(eligible[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn test_series_bounded_by_as_of_and_lookback() {
        let history = InMemoryVolatilityHistory::new();
        let observations = (0..10)
            .map(|i| IvObservation::new(as_of() - Days::new(i), 0.20 + 0.01 * i as f64))
            .chain(std::iter::once(IvObservation::new(as_of() + Days::new(1), 0.99)))
            .collect();
        history.insert("SPY", observations);

        let series = history.iv_series("SPY", as_of(), 5).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series.last().unwrap().date, as_of());
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert!(series.iter().all(|obs| obs.iv < 0.99));
    }

    #[test]
    fn test_unknown_symbol_is_unavailable() {
        let history = InMemoryVolatilityHistory::new();
        let Err(err) = history.iv_series("QQQ", as_of(), 60) else {
            panic!("expected error");
        };
        assert!(err.to_string().contains("QQQ"));
    }
}
