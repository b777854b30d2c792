//! File model for observed benchmark prices.

use chrono::NaiveDate;
use moneycalc_core::portfolio::performance::SeenPrice;
use moneycalc_core::Error;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const DMY_FORMAT: &str = "%d-%m-%Y";

/// One entry of `seen-prices.json`: `{"dmy": "15-03-2024", "price": 512.3}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeenPriceDB {
    pub dmy: String,
    pub price: Decimal,
}

impl TryFrom<SeenPriceDB> for SeenPrice {
    type Error = Error;

    fn try_from(db: SeenPriceDB) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&db.dmy, DMY_FORMAT)
            .map_err(|e| Error::invalid_input(format!("seen price date '{}': {}", db.dmy, e)))?;
        if db.price <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "seen price on {} must be positive, got {}",
                db.dmy, db.price
            )));
        }
        Ok(SeenPrice {
            date,
            price: db.price,
        })
    }
}

impl From<SeenPrice> for SeenPriceDB {
    fn from(price: SeenPrice) -> Self {
        SeenPriceDB {
            dmy: price.date.format(DMY_FORMAT).to_string(),
            price: price.price,
        }
    }
}
