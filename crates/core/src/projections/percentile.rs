use statrs::distribution::{ContinuousCDF, Normal};

use crate::errors::{CalculatorError, Error, Result};

/// Portfolio value at `percentile` after `years`, assuming log-normal returns.
///
/// `cagr` and `volatility` are yearly fractions (0.04 for 4%). The median
/// outcome is `initial * exp((cagr - volatility^2 / 2) * years)`.
pub fn portfolio_percentile(
    initial_value: f64,
    cagr: f64,
    volatility: f64,
    years: u32,
    percentile: f64,
) -> Result<f64> {
    if !(percentile > 0.0 && percentile < 1.0) {
        return Err(Error::invalid_input(format!(
            "percentile must be strictly between 0 and 1, got {}",
            percentile
        )));
    }
    if volatility < 0.0 {
        return Err(Error::invalid_input(format!(
            "volatility must not be negative, got {}",
            volatility
        )));
    }

    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| CalculatorError::Calculation(e.to_string()))?;
    let z = standard.inverse_cdf(percentile);

    let years = f64::from(years);
    let drift = (cagr - volatility * volatility / 2.0) * years;
    let diffusion = volatility * years.sqrt() * z;
    Ok(initial_value * (drift + diffusion).exp())
}
