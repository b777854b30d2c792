use rust_decimal::Decimal;

use crate::money::Currency;
use crate::series::IndexSeries;

/// Monthly price of one unit of `from`, expressed in `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateSeries {
    pub from: Currency,
    pub to: Currency,
    pub rates: IndexSeries,
}

impl ExchangeRateSeries {
    pub fn new(from: Currency, to: Currency, rates: IndexSeries) -> Self {
        Self { from, to, rates }
    }

    /// A pair that converts at `rate` in every month, e.g. two listings of one fund.
    pub fn constant(from: Currency, to: Currency, rate: Decimal) -> Self {
        Self {
            from,
            to,
            rates: IndexSeries::constant(format!("{}/{}", from, to), rate),
        }
    }

    pub fn pair_name(&self) -> String {
        format!("{}/{}", self.from, self.to)
    }
}
