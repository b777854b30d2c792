//! Monthly time series: the time axis, money series, index series and loaders.

mod index_series;
mod interpolation;
mod money_amount_series;
mod series_traits;
mod year_month;

pub use index_series::IndexSeries;
pub use interpolation::InterpolationStrategy;
pub use money_amount_series::MoneyAmountSeries;
pub use series_traits::SeriesRepositoryTrait;
pub use year_month::YearMonth;
