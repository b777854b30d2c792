//! MoneyCalc Core - Domain types, calculators, and repository traits.
//!
//! This crate contains the analysis logic for MoneyCalc: money and monthly
//! series arithmetic, currency conversion, inflation adjustment, portfolio
//! returns, rebalancing and retirement projections.
//! It does no I/O of its own; the traits it defines are implemented
//! by the `storage-json` crate.

pub mod aggregation;
pub mod constants;
pub mod context;
pub mod errors;
pub mod fx;
pub mod inflation;
pub mod investments;
pub mod money;
pub mod portfolio;
pub mod projections;
pub mod rebalancing;
pub mod series;

pub use context::MarketContext;
pub use money::{Currency, MoneyAmount};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
