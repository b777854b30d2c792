use super::investments_model::Investment;
use crate::errors::Result;

/// Trait defining the contract for reading the investment ledger.
pub trait InvestmentRepositoryTrait: Send + Sync {
    /// All lots of the named ledger, in ledger order.
    fn load_investments(&self, name: &str) -> Result<Vec<Investment>>;
}
