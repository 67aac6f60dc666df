//! Volatility context: IV rank, tiers and delta targets.

mod cache;
mod context;
mod provider;
mod rank;
mod tiers;

pub use cache::VolatilityCache;
pub use context::{IvObservation, VolConfidence, VolatilityContext};
pub use provider::VolatilityContextProvider;
pub use rank::{DEFAULT_IV_RANK, iv_rank, trailing_window};
pub use tiers::{DeltaTarget, VolTier, adjust_delta};
