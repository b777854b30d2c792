use std::collections::BTreeMap;

use super::goal_model::ExpectedReturnGroup;
use crate::errors::Result;

/// Trait for reading the expected return table, keyed by group name.
pub trait ExpectedReturnsRepositoryTrait: Send + Sync {
    fn load_expected_returns(&self) -> Result<BTreeMap<String, ExpectedReturnGroup>>;
}
