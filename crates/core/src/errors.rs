//! Error types shared by every calculation.
//!
//! Nothing here knows about files; the storage layer maps its own failures
//! onto `Error::Repository`, `Error::SeriesNotFound` or a validation error.

use thiserror::Error;

use crate::fx::FxError;
use crate::money::Currency;
use crate::series::YearMonth;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is terminal for the report being computed; variants carry
/// enough context (series name, month, currencies) to fix the input data.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No data found in series '{series}' for {month}")]
    NoSeriesDataFound { series: String, month: YearMonth },

    #[error("Series '{0}' cannot be located")]
    SeriesNotFound(String),

    #[error("Series '{0}' is empty")]
    EmptySeries(String),

    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    #[error("Currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl Error {
    pub fn no_data(series: impl Into<String>, month: YearMonth) -> Self {
        Error::NoSeriesDataFound {
            series: series.into(),
            month,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("No investments to evaluate")]
    NoInvestments,

    #[error("Price for {0} is not positive")]
    NonPositivePrice(Currency),

    #[error("Missing price for {0}")]
    MissingPrice(Currency),

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
