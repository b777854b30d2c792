//! JSON storage implementation for observed benchmark prices.

mod model;
mod repository;

pub use model::SeenPriceDB;
pub use repository::SeenPricesRepository;
