//! Greedy proportional rebalancing of the ETF portfolio.

pub mod buy_side;
mod rebalancing_model;
mod rebalancing_service;
mod rebalancing_traits;
pub mod sell_side;
mod tracking_error;

pub use rebalancing_model::*;
pub use rebalancing_service::RebalancingService;
pub use rebalancing_traits::RebalancingConfigRepositoryTrait;
pub use tracking_error::tracking_error;
