//! Delta-targeted strike resolution.
//!
//! Finds the listed strike whose delta magnitude best matches a target with a
//! directed binary search. The first pivot is placed one expected move out of
//! the money, so the search touches a handful of quotes even on chains with
//! hundreds of strikes.

mod error;
mod search;
mod types;

pub use error::ResolveError;
pub use search::resolve;
pub use types::{MatchQuality, ResolveParams, ResolvedStrike};
