//! Application Ports (Interfaces)
//!
//! Ports define the boundaries between the application layer and external
//! systems.
//!
//! # Port Types
//!
//! - **Driven (Secondary) Ports**: interfaces the engine calls out through
//!   - `MarketDataPort`: option chains and underlying prices
//!   - `VolatilityHistoryPort`: daily IV series for IV rank

mod market_data_port;
mod volatility_history_port;

pub use market_data_port::{MarketDataError, MarketDataPort};
pub use volatility_history_port::{VolatilityHistoryError, VolatilityHistoryPort};

#[cfg(test)]
pub use market_data_port::MockMarketDataPort;
#[cfg(test)]
pub use volatility_history_port::MockVolatilityHistoryPort;
