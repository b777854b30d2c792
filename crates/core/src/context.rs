//! Shared market data handed to every report.

use chrono::NaiveDate;

use crate::fx::CurrencyConverter;
use crate::inflation::CpiInflation;

/// The converter, the price index and the evaluation date a report runs against.
///
/// Built once by the caller and borrowed by every calculation, so all parts
/// of a report see the same rates and the same "today".
#[derive(Clone, Copy)]
pub struct MarketContext<'a> {
    pub fx: &'a CurrencyConverter,
    pub inflation: &'a CpiInflation,
    pub as_of: NaiveDate,
}

impl<'a> MarketContext<'a> {
    pub fn new(fx: &'a CurrencyConverter, inflation: &'a CpiInflation, as_of: NaiveDate) -> Self {
        Self {
            fx,
            inflation,
            as_of,
        }
    }
}
