//! IV history adapters.

mod in_memory;

pub use in_memory::InMemoryVolatilityHistory;
