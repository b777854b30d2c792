//! JSON storage implementation for the target allocation.

mod model;
mod repository;

pub use model::RebalancingConfigDB;
pub use repository::RebalancingConfigRepository;
