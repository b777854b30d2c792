use super::performance_model::SeenPrice;
use crate::errors::Result;
use crate::money::Currency;

/// Trait defining the contract for reading observed benchmark prices.
pub trait SeenPricesRepositoryTrait: Send + Sync {
    /// Prices recorded for `benchmark`; none recorded is an empty list.
    fn load_seen_prices(&self, benchmark: Currency) -> Result<Vec<SeenPrice>>;
}
