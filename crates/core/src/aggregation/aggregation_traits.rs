use crate::errors::Result;
use crate::series::{IndexSeries, MoneyAmountSeries};

/// Trailing-window statistics over a monthly series.
pub trait Aggregation {
    /// Mean of the window ending at each month.
    fn average(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries>;

    /// Total of the window ending at each month.
    fn sum(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries>;

    /// Difference between each month and the start of its window.
    fn change(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries>;

    /// `change` divided by the value at the start of the window; a zero start yields 0.
    fn percent_change(&self, series: &MoneyAmountSeries) -> Result<IndexSeries>;
}
