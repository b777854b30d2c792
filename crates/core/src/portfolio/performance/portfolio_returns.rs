use chrono::{Datelike, NaiveDate};
use log::debug;

use super::modified_dietz::ModifiedDietzReturn;
use super::performance_model::{PortfolioReturnsReport, YearlyReturn};
use crate::context::MarketContext;
use crate::errors::{CalculatorError, Error, Result};
use crate::investments::Investment;
use crate::money::Currency;

/// Calendar-year return table of a ledger.
pub struct PortfolioReturns;

impl PortfolioReturns {
    /// One Modified Dietz row per calendar year from the first entry through the
    /// evaluation year, and the return over the whole history.
    pub fn yearly(
        market: MarketContext<'_>,
        investments: &[Investment],
        currency: Currency,
        nominal: bool,
    ) -> Result<PortfolioReturnsReport> {
        let first_year = investments
            .iter()
            .map(|inv| inv.initial_date().year())
            .min()
            .ok_or(CalculatorError::NoInvestments)?;
        let last_year = market.as_of.year();

        let mut years = Vec::new();
        for year in first_year..=last_year {
            let (start, end) = year_bounds(year)?;
            let dietz =
                ModifiedDietzReturn::new(market, investments, currency, nominal, start, end)?;
            let result = dietz.get()?;
            debug!("{} return: {}", year, result.money_weighted);
            years.push(YearlyReturn {
                year,
                period_start_date: dietz.initial(),
                period_end_date: dietz.final_date(),
                money_weighted: result.money_weighted,
                annualized_money_weighted: result.annualized_money_weighted,
            });
        }

        let total =
            ModifiedDietzReturn::for_whole_history(market, investments, currency, nominal)?.get()?;

        Ok(PortfolioReturnsReport {
            currency,
            nominal,
            years,
            total,
        })
    }
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    start
        .zip(end)
        .ok_or_else(|| Error::invalid_input(format!("year {} is out of range", year)))
}
