use serde::{Deserialize, Serialize};

use super::YearMonth;
use crate::errors::{Error, Result};
use crate::money::MoneyAmount;

/// How months missing between two recorded points of a series are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpolationStrategy {
    /// A gap is a data error.
    #[default]
    NoInterpolation,
    /// Repeat the last recorded amount.
    #[serde(alias = "LAST_VALUE_INTERPOLATION")]
    LastValue,
    /// Fill with zero in the series currency.
    #[serde(alias = "ZERO_VALUE_INTERPOLATION")]
    ZeroValue,
}

impl InterpolationStrategy {
    pub fn interpolate(
        &self,
        series: &str,
        last_value: MoneyAmount,
        missing: YearMonth,
    ) -> Result<MoneyAmount> {
        match self {
            InterpolationStrategy::NoInterpolation => Err(Error::no_data(series, missing)),
            InterpolationStrategy::LastValue => Ok(last_value),
            InterpolationStrategy::ZeroValue => Ok(MoneyAmount::zero(last_value.currency())),
        }
    }
}
