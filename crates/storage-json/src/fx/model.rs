//! File models for the exchange rate catalog.

use moneycalc_core::fx::ExchangeRateSeries;
use moneycalc_core::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pair whose monthly rates live in their own series file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FxSeriesDB {
    pub from: Currency,
    pub to: Currency,
    pub file: String,
}

/// A pair that converts at a fixed rate, e.g. two listings of the same fund
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FxConstantDB {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FxCatalogDB {
    #[serde(default)]
    pub series: Vec<FxSeriesDB>,
    #[serde(default)]
    pub constants: Vec<FxConstantDB>,
}

impl From<FxConstantDB> for ExchangeRateSeries {
    fn from(db: FxConstantDB) -> Self {
        ExchangeRateSeries::constant(db.from, db.to, db.rate)
    }
}
