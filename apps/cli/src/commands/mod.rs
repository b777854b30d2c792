//! CLI command implementations.

pub mod performance;
pub mod projections;
pub mod rebalancing;
pub mod series;

// Re-export argument types for the CLI definition
pub use performance::{DietzArgs, ReturnsArgs};
pub use projections::{GoalArgs, PercentileArgs};
pub use rebalancing::{BuyArgs, SellArgs};
pub use series::{AggregateArgs, ExchangeArgs, InflateArgs};
