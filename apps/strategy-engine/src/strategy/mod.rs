//! Strategy structures and their builders.
//!
//! Builders assemble fixed-shape, validated candidates from resolved short
//! strikes:
//!
//! - `IronCondor`: short put and short call resolved independently, wings
//!   placed by width
//! - `BullPutSpread` / `BearCallSpread`: one short strike and a protective wing
//! - `CashSecuredPut` / `CoveredCall`: single short wheel leg
//!
//! Every failure is folded into an invalid candidate with a reason string.

mod builder;
mod candidate;
mod error;
mod iron_condor;
mod leg;
mod types;
mod validation;
mod vertical;
mod wheel;

#[cfg(test)]
pub(crate) use builder::test_support;
pub use builder::{BuildRequest, StrategyBuilder};
pub use candidate::{CandidateFlags, CandidateMetrics, CandidateStatus, StrategyCandidate};
pub use error::StructureError;
pub use leg::{PositionSide, StrategyLeg, Structure};
pub use types::{StrategyFamily, StrategyKind};
