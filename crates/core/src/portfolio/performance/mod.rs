//! Money-weighted performance of the investment ledger.

mod benchmark;
mod modified_dietz;
pub mod performance_model;
mod performance_traits;
mod portfolio_returns;

pub use benchmark::BenchmarkMapper;
pub use modified_dietz::ModifiedDietzReturn;
pub use performance_model::*;
pub use performance_traits::SeenPricesRepositoryTrait;
pub use portfolio_returns::PortfolioReturns;
