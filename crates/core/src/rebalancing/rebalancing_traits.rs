use super::rebalancing_model::RebalancingConfig;
use crate::errors::Result;

/// Trait for loading the target allocation.
pub trait RebalancingConfigRepositoryTrait: Send + Sync {
    fn load_rebalancing_config(&self) -> Result<RebalancingConfig>;
}
