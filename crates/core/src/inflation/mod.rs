//! Inflation module - price-index based adjustment of amounts, series and lots.

mod cpi_inflation;

pub use cpi_inflation::CpiInflation;
