//! IV rank computation over a trailing observation window.

use chrono::NaiveDate;

use super::context::IvObservation;

/// Rank reported when the window is too thin to trust.
pub const DEFAULT_IV_RANK: f64 = 50.0;

/// Observations dated on or before `as_of`, oldest first, trimmed to the
/// trailing `lookback` entries.
#[must_use]
pub fn trailing_window(
    series: &[IvObservation],
    as_of: NaiveDate,
    lookback: usize,
) -> Vec<IvObservation> {
    let mut window: Vec<IvObservation> = series
        .iter()
        .filter(|obs| obs.date <= as_of && obs.iv.is_finite())
        .copied()
        .collect();
    window.sort_by_key(|obs| obs.date);

    let skip = window.len().saturating_sub(lookback);
    window.split_off(skip)
}

/// Percentile of the latest observation among the prior ones, in [0, 100].
///
/// Prior observations equal to the latest count half. Returns `None` when
/// fewer than two observations are available.
#[must_use]
pub fn iv_rank(window: &[IvObservation]) -> Option<f64> {
    let (latest, prior) = window.split_last()?;
    if prior.is_empty() {
        return None;
    }

    let (below, equal) = prior.iter().fold((0usize, 0usize), |(below, equal), obs| {
        if obs.iv < latest.iv {
            (below + 1, equal)
        } else if (obs.iv - latest.iv).abs() < f64::EPSILON {
            (below, equal + 1)
        } else {
            (below, equal)
        }
    });

    let rank = (below as f64 + 0.5 * equal as f64) / prior.len() as f64 * 100.0;
    Some(rank.clamp(0.0, 100.0))
}
