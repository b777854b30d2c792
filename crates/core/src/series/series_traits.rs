use super::{IndexSeries, MoneyAmountSeries};
use crate::errors::Result;

/// Trait defining the contract for reading persisted monthly series by name.
///
/// Names are storage-relative paths such as `"saving/ahorros-cspx.json"`.
/// An unknown name is reported as `Error::SeriesNotFound`.
pub trait SeriesRepositoryTrait: Send + Sync {
    fn read_money_series(&self, name: &str) -> Result<MoneyAmountSeries>;
    fn read_index_series(&self, name: &str) -> Result<IndexSeries>;

    /// Reads every named series and adds them month by month.
    fn sum_money_series(&self, names: &[&str]) -> Result<MoneyAmountSeries> {
        let mut names = names.iter();
        let first = names.next().ok_or_else(|| {
            crate::errors::Error::invalid_input("at least one series name is required")
        })?;
        let mut total = self.read_money_series(first)?;
        for name in names {
            total = total.add(&self.read_money_series(name)?)?;
        }
        Ok(total)
    }
}
