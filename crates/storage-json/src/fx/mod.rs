//! JSON storage implementation for the exchange rate catalog.

mod model;
mod repository;

pub use model::{FxCatalogDB, FxConstantDB, FxSeriesDB};
pub use repository::FxRepository;
