//! JSON file storage implementation for MoneyCalc.
//!
//! This crate implements the repository traits defined in `moneycalc-core`
//! on top of a data directory of JSON files:
//! - monthly money and index series, with optional gap interpolation
//! - the investment ledger
//! - the exchange rate catalog (`fx.json`)
//! - the rebalancing config and the expected return table
//! - observed benchmark prices
//!
//! # Architecture
//!
//! ```text
//!   core (domain, traits)
//!            │
//!            ▼
//!   storage-json (this crate)
//!            │
//!            ▼
//!      <data dir>/*.json
//! ```

pub mod errors;
pub mod store;

// Repository implementations
pub mod fx;
pub mod investments;
pub mod performance;
pub mod projections;
pub mod rebalancing;
pub mod series;

pub use errors::StorageError;
pub use store::JsonStore;

pub use fx::FxRepository;
pub use investments::InvestmentRepository;
pub use performance::SeenPricesRepository;
pub use projections::ExpectedReturnsRepository;
pub use rebalancing::RebalancingConfigRepository;
pub use series::SeriesRepository;

// Re-export from moneycalc-core for convenience
pub use moneycalc_core::errors::{Error, Result};
