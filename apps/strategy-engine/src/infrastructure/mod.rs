//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - `market_data/`: in-memory chain snapshots and underlying prices
//! - `volatility_history/`: in-memory daily IV series
//! - `fixture`: JSON market fixtures that seed both adapters

pub mod fixture;
pub mod market_data;
pub mod volatility_history;

pub use fixture::{FixtureError, MarketFixture, SymbolFixture};
pub use market_data::InMemoryMarketData;
pub use volatility_history::InMemoryVolatilityHistory;
