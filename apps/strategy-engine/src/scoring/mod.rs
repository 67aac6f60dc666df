//! Strategy scoring and selection.
//!
//! Each valid candidate receives a composite 0-100 score from four weighted
//! components: risk/reward, probability of success, expected return and
//! volatility context. The selector ranks candidates per symbol and fans
//! batches out across a thread pool.

mod scorer;
mod selector;
mod types;

pub use scorer::{StrategyScorer, vol_context_score};
pub use selector::{BatchSelection, SelectionError, SelectionRequest, StrategySelector};
pub use types::{ComponentScores, Rejection, ScoredStrategy};
