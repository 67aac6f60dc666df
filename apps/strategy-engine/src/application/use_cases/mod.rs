//! Application Use Cases
//!
//! Use cases orchestrate the engine behind the application ports.

mod select_strategies;

pub use select_strategies::{SelectStrategiesUseCase, SelectionTarget, SymbolSelection};
