use std::error::Error;
use std::fmt;

use crate::money::Currency;

#[derive(Debug)]
pub enum FxError {
    NoConversionPath(Currency, Currency),
    InvalidRate(String),
    InvalidCurrencyPair(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FxError::NoConversionPath(from, to) => {
                write!(f, "No conversion path from {} to {}", from, to)
            }
            FxError::InvalidRate(msg) => write!(f, "Invalid exchange rate: {}", msg),
            FxError::InvalidCurrencyPair(msg) => write!(f, "Invalid currency pair: {}", msg),
        }
    }
}

impl Error for FxError {}
