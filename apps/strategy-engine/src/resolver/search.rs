//! Directed search over one side of an option chain.
//!
//! The first pivot sits one expected move out of the money. Until the target
//! is bracketed the pivot moves along the local delta slope, bounded by a step
//! that doubles after every move, so a misstated or zero expected move still
//! crosses the chain in a logarithmic number of lookups. Once a visited
//! strike on each side of the target is known the search bisects between them.

use tracing::{debug, instrument};

use super::error::ResolveError;
use super::types::{MatchQuality, ResolveParams, ResolvedStrike};
use crate::observability::record_strike_resolution;
use crate::options::{OptionChainSnapshot, OptionQuote, OptionRight, strike_f64};

/// Slack applied to floating point comparisons of strikes and delta errors.
const EPSILON: f64 = 1e-9;

/// Resolve the strike whose delta magnitude best matches `target`.
///
/// # Errors
///
/// Returns `ResolveError::ChainIncomplete` when the chain is empty, lacks
/// either right, or has no delta-bearing quote for `right`. Returns
/// `ResolveError::StrikeNotFound` when even the closest strike is too far
/// from the target or sits in the money.
#[instrument(skip_all, fields(symbol = chain.symbol(), right = %right, target_delta = target))]
pub fn resolve(
    chain: &OptionChainSnapshot,
    right: OptionRight,
    target: f64,
    params: &ResolveParams,
) -> Result<ResolvedStrike, ResolveError> {
    let result = Search::new(chain, right, target, params).and_then(|search| search.run());

    match &result {
        Ok(resolved) => {
            let outcome = match resolved.quality {
                MatchQuality::Converged => "converged",
                MatchQuality::ClosestAvailable => "closest_available",
            };
            record_strike_resolution(&right.to_string(), outcome, resolved.iterations);
        }
        Err(ResolveError::ChainIncomplete { .. }) => {
            record_strike_resolution(&right.to_string(), "chain_incomplete", 0);
        }
        Err(ResolveError::StrikeNotFound { .. }) => {
            record_strike_resolution(&right.to_string(), "strike_not_found", params.max_iterations);
        }
    }

    result
}

/// Closest visited strikes on either side of the target.
#[derive(Debug, Default)]
struct Bracket {
    /// Most out-of-the-money visit whose magnitude is still above target.
    too_deep: Option<usize>,
    /// Most in-the-money visit whose magnitude is at or below target.
    too_shallow: Option<usize>,
}

impl Bracket {
    fn record(&mut self, idx: usize, too_deep: bool, right: OptionRight) {
        let further_otm = |current: usize| match right {
            OptionRight::Put => idx < current,
            OptionRight::Call => idx > current,
        };

        if too_deep {
            if self.too_deep.is_none_or(further_otm) {
                self.too_deep = Some(idx);
            }
        } else if self.too_shallow.is_none_or(|current| !further_otm(current)) {
            self.too_shallow = Some(idx);
        }
    }

    /// Lower and upper index once both sides are known.
    fn bounds(&self) -> Option<(usize, usize)> {
        let (deep, shallow) = (self.too_deep?, self.too_shallow?);
        Some((deep.min(shallow), deep.max(shallow)))
    }
}

struct Search<'a> {
    quotes: &'a [OptionQuote],
    right: OptionRight,
    target: f64,
    params: &'a ResolveParams,
    increment: f64,
}

impl<'a> Search<'a> {
    fn new(
        chain: &'a OptionChainSnapshot,
        right: OptionRight,
        target: f64,
        params: &'a ResolveParams,
    ) -> Result<Self, ResolveError> {
        if chain.is_empty() {
            return Err(ResolveError::ChainIncomplete {
                right,
                message: "chain has no quotes".to_string(),
            });
        }
        if !chain.has_both_sides() {
            return Err(ResolveError::ChainIncomplete {
                right,
                message: "chain is missing puts or calls".to_string(),
            });
        }

        Ok(Self {
            quotes: chain.quotes(right),
            right,
            target,
            params,
            increment: chain.strike_increment(right).map_or(0.0, strike_f64),
        })
    }

    fn run(&self) -> Result<ResolvedStrike, ResolveError> {
        let otm = f64::from(self.right.otm_direction());
        let sigma = self.params.expected_move();
        let mut pivot = strike_f64(self.params.underlying_price) + otm * sigma;
        let mut step = sigma / 2.0;
        let mut bracket = Bracket::default();
        let mut best_seen: Option<usize> = None;
        let mut iterations = 0u32;

        let Some(mut idx) = self.nearest(pivot) else {
            return Err(ResolveError::ChainIncomplete {
                right: self.right,
                message: "no quotes carry a delta".to_string(),
            });
        };

        for _ in 0..self.params.max_iterations {
            iterations += 1;

            let best = self.best_in_window(idx);
            if best_seen.is_none_or(|seen| self.error(best) < self.error(seen) - EPSILON) {
                best_seen = Some(best);
            }
            debug!(
                iteration = iterations,
                pivot,
                step,
                visited_strike = self.strike(idx),
                visited_delta = self.magnitude(idx),
                best_strike = self.strike(best),
                "Visited strike"
            );

            if self.error(best) <= self.params.tolerance + EPSILON {
                return Ok(self.resolved(best, iterations, MatchQuality::Converged));
            }

            let too_deep = self.steering_magnitude(idx) > self.target;
            bracket.record(idx, too_deep, self.right);

            if let Some((low, high)) = bracket.bounds() {
                let Some(next) = self.bisect(low, high) else {
                    // Every strike between the bounds has been seen in a window.
                    break;
                };
                idx = next;
                continue;
            }

            let direction = if too_deep { otm } else { -otm };
            let distance = self.secant_distance(idx).map_or(step, |estimate| {
                estimate.clamp(self.increment, (2.0 * step).max(self.increment))
            });
            pivot += direction * distance;

            let Some(mut next) = self.nearest(pivot) else {
                break;
            };
            if next == idx {
                // The step fell inside one strike gap; take the next listed one.
                let Some(adjacent) = self.neighbour(idx, direction > 0.0) else {
                    break;
                };
                next = adjacent;
                pivot = self.strike(adjacent);
            }

            step = (step * 2.0).max(self.increment);
            idx = next;
        }

        self.fallback(best_seen.unwrap_or(idx), iterations)
    }

    fn fallback(&self, best: usize, iterations: u32) -> Result<ResolvedStrike, ResolveError> {
        let error = self.error(best);

        if error <= self.params.tolerance + EPSILON {
            return Ok(self.resolved(best, iterations, MatchQuality::Converged));
        }

        let quote = &self.quotes[best];
        let in_the_money = match self.right {
            OptionRight::Put => quote.strike > self.params.underlying_price,
            OptionRight::Call => quote.strike < self.params.underlying_price,
        };

        if error > self.params.max_fallback_error + EPSILON || in_the_money {
            debug!(
                strike = %quote.strike,
                delta_error = error,
                in_the_money,
                "No acceptable fallback strike"
            );
            return Err(ResolveError::StrikeNotFound {
                right: self.right,
                target: self.target,
                closest: quote.strike,
                delta_error: error,
            });
        }

        Ok(self.resolved(best, iterations, MatchQuality::ClosestAvailable))
    }

    /// Delta-bearing index nearest the pivot; ties resolve further out of the money.
    fn nearest(&self, pivot: f64) -> Option<usize> {
        let pos = self.quotes.partition_point(|q| strike_f64(q.strike) < pivot);
        let below = (0..pos).rev().find(|&i| self.has_delta(i));
        let above = (pos..self.quotes.len()).find(|&i| self.has_delta(i));

        match (below, above) {
            (Some(below), Some(above)) => {
                let below_distance = pivot - self.strike(below);
                let above_distance = self.strike(above) - pivot;
                if below_distance < above_distance - EPSILON {
                    Some(below)
                } else if above_distance < below_distance - EPSILON {
                    Some(above)
                } else {
                    match self.right {
                        OptionRight::Put => Some(below),
                        OptionRight::Call => Some(above),
                    }
                }
            }
            (below, above) => below.or(above),
        }
    }

    /// Next delta-bearing index above or below `idx`.
    fn neighbour(&self, idx: usize, higher: bool) -> Option<usize> {
        if higher {
            (idx + 1..self.quotes.len()).find(|&i| self.has_delta(i))
        } else {
            (0..idx).rev().find(|&i| self.has_delta(i))
        }
    }

    /// Delta-bearing index strictly between the bounds, nearest their midpoint.
    fn bisect(&self, low: usize, high: usize) -> Option<usize> {
        if high - low <= 2 {
            return None;
        }
        let midpoint = (self.strike(low) + self.strike(high)) / 2.0;
        let mut next = self.nearest(midpoint)?;
        if next <= low {
            next = self.neighbour(low, true)?;
        }
        if next >= high {
            next = self.neighbour(high, false)?;
        }
        (low < next && next < high).then_some(next)
    }

    /// Best of the visited quote and its neighbours; the visited quote wins ties.
    fn best_in_window(&self, idx: usize) -> usize {
        let mut best = idx;
        for neighbour in [self.neighbour(idx, false), self.neighbour(idx, true)]
            .into_iter()
            .flatten()
        {
            if self.error(neighbour) < self.error(best) - EPSILON {
                best = neighbour;
            }
        }
        best
    }

    /// Magnitude used to steer the pivot.
    ///
    /// A visited quote that breaks monotonicity against both neighbours is treated as
    /// stale and replaced by the neighbours' mean.
    fn steering_magnitude(&self, idx: usize) -> f64 {
        let magnitude = self.magnitude(idx);
        let (Some(low), Some(high)) = (self.neighbour(idx, false), self.neighbour(idx, true)) else {
            return magnitude;
        };

        let below = self.magnitude(low);
        let above = self.magnitude(high);
        // Put magnitudes rise with strike, call magnitudes fall.
        let monotonic = match self.right {
            OptionRight::Put => below <= magnitude && magnitude <= above,
            OptionRight::Call => below >= magnitude && magnitude >= above,
        };

        if monotonic {
            magnitude
        } else {
            debug!(
                strike = self.strike(idx),
                magnitude, below, above, "Non-monotonic delta, steering by neighbours"
            );
            (below + above) / 2.0
        }
    }

    /// Strike distance to the target along the local delta slope.
    ///
    /// `None` when the window is flat or slopes the wrong way for the right.
    fn secant_distance(&self, idx: usize) -> Option<f64> {
        let low = self.neighbour(idx, false).unwrap_or(idx);
        let high = self.neighbour(idx, true).unwrap_or(idx);
        if low == high {
            return None;
        }

        let slope =
            (self.magnitude(high) - self.magnitude(low)) / (self.strike(high) - self.strike(low));
        let usable = match self.right {
            OptionRight::Put => slope > EPSILON,
            OptionRight::Call => slope < -EPSILON,
        };
        usable.then(|| ((self.target - self.steering_magnitude(idx)) / slope).abs())
    }

    fn has_delta(&self, idx: usize) -> bool {
        self.quotes[idx].delta.is_some()
    }

    fn strike(&self, idx: usize) -> f64 {
        strike_f64(self.quotes[idx].strike)
    }

    fn magnitude(&self, idx: usize) -> f64 {
        self.quotes[idx].delta.map_or(0.0, f64::abs)
    }

    fn error(&self, idx: usize) -> f64 {
        (self.magnitude(idx) - self.target).abs()
    }

    fn resolved(&self, idx: usize, iterations: u32, quality: MatchQuality) -> ResolvedStrike {
        let quote = &self.quotes[idx];
        ResolvedStrike {
            right: self.right,
            strike: quote.strike,
            delta: quote.delta.unwrap_or_default(),
            mid: quote.mid(),
            delta_error: self.error(idx),
            iterations,
            quality,
        }
    }
}
