//! Option chain data consumed by the engine.
//!
//! This module provides:
//! - Quote types (right, Greeks, bid/ask, IV) for a single contract
//! - The immutable, strike-sorted chain snapshot for one (symbol, expiry)

mod chain;
mod types;

pub(crate) use chain::strike_f64;
pub use chain::{ChainError, ChainSnapshotData, OptionChainSnapshot};
pub use types::{OptionQuote, OptionRight};
