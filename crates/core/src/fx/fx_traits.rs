use super::fx_model::ExchangeRateSeries;
use crate::errors::Result;

/// Trait defining the contract for loading the exchange rate catalog.
pub trait FxRepositoryTrait: Send + Sync {
    /// Every known pair with its monthly rates.
    fn load_exchange_rates(&self) -> Result<Vec<ExchangeRateSeries>>;
}
