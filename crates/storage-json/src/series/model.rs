//! File models for series.

use moneycalc_core::errors::Result;
use moneycalc_core::series::{IndexSeries, InterpolationStrategy, MoneyAmountSeries, YearMonth};
use moneycalc_core::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// File model for one monthly point
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeriesPointDB {
    pub year: i32,
    pub month: u32,
    #[serde(alias = "value")]
    pub amount: Decimal,
}

/// File model for a series: money series carry a currency, index files may omit it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesFileDB {
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub interpolation: InterpolationStrategy,
    pub data: Vec<SeriesPointDB>,
}

impl SeriesFileDB {
    fn points(&self) -> Result<Vec<(YearMonth, Decimal)>> {
        self.data
            .iter()
            .map(|point| Ok((YearMonth::new(point.year, point.month)?, point.amount)))
            .collect()
    }

    pub fn into_money_series(self, name: &str, currency: Currency) -> Result<MoneyAmountSeries> {
        MoneyAmountSeries::from_points(name, currency, self.points()?, self.interpolation)
    }

    /// Gaps are filled as for money series, then the values are taken as plain factors.
    pub fn into_index_series(self, name: &str) -> Result<IndexSeries> {
        let currency = self.currency.unwrap_or(Currency::USD);
        let filled = self.into_money_series(name, currency)?;
        IndexSeries::from_points(name, filled.items().map(|(ym, value)| (ym, value.amount())))
    }
}
