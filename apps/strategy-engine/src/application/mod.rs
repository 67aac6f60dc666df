//! Application Layer
//!
//! The application layer orchestrates the engine through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for market data and IV history
//! - **Use Cases**: Multi-symbol strategy selection

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
