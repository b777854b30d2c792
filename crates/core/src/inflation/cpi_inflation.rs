use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::investments::{Investment, InvestmentEvent};
use crate::money::{Currency, MoneyAmount};
use crate::series::{IndexSeries, MoneyAmountSeries, YearMonth};

/// Inflation adjustment driven by a consumer price index.
///
/// `adjust(amount, from, to)` is `amount * index(to) / index(from)`; both months
/// must lie within `[get_from, get_to]`.
#[derive(Debug, Clone)]
pub struct CpiInflation {
    currency: Currency,
    index: IndexSeries,
    from: YearMonth,
    to: YearMonth,
}

impl CpiInflation {
    pub fn new(currency: Currency, index: IndexSeries) -> Result<Self> {
        let (from, to) = match (index.from(), index.to()) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(Error::EmptySeries(index.name().to_string())),
        };
        if let Some((ym, value)) = index.items().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(Error::invalid_input(format!(
                "index '{}' has non-positive value {} in {}",
                index.name(),
                value,
                ym
            )));
        }
        Ok(Self {
            currency,
            index,
            from,
            to,
        })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn get_from(&self) -> YearMonth {
        self.from
    }

    pub fn get_to(&self) -> YearMonth {
        self.to
    }

    fn index_at(&self, ym: YearMonth) -> Result<Decimal> {
        if ym < self.from || ym > self.to {
            return Err(Error::no_data(self.index.name(), ym));
        }
        self.index.get_index(ym)
    }

    /// Moves `amount` from the money of `from` to the money of `to`.
    pub fn adjust(&self, amount: &MoneyAmount, from: YearMonth, to: YearMonth) -> Result<MoneyAmount> {
        amount.assert_currency(self.currency)?;
        let from_index = self.index_at(from)?;
        let to_index = self.index_at(to)?;
        if from == to {
            return Ok(*amount);
        }
        amount.adjust(from_index, to_index)
    }

    pub fn adjust_ym(
        &self,
        amount: &MoneyAmount,
        from_year: i32,
        from_month: u32,
        to_year: i32,
        to_month: u32,
    ) -> Result<MoneyAmount> {
        self.adjust(
            amount,
            YearMonth::new(from_year, from_month)?,
            YearMonth::new(to_year, to_month)?,
        )
    }

    /// Every month of `series` expressed in the money of `to`.
    pub fn adjust_series(&self, series: &MoneyAmountSeries, to: YearMonth) -> Result<MoneyAmountSeries> {
        let adjusted = series.map(|ym, amount| self.adjust(&amount, ym, to))?;
        Ok(adjusted.with_name(format!("{} (real {})", series.name(), to)))
    }

    /// A copy of `investment` with entry and exit amounts in the money of
    /// `get_to()`. Events in other currencies are left as recorded.
    pub fn real(&self, investment: &Investment) -> Result<Investment> {
        let mut real = investment.clone();
        real.entry = self.real_event(&investment.entry)?;
        real.exit = investment
            .exit
            .as_ref()
            .map(|out| self.real_event(out))
            .transpose()?;
        Ok(real)
    }

    fn real_event(&self, event: &InvestmentEvent) -> Result<InvestmentEvent> {
        if event.currency != self.currency {
            return Ok(event.clone());
        }
        let adjusted = self.adjust(
            &event.money_amount(),
            YearMonth::from_date(event.date),
            self.to,
        )?;
        Ok(InvestmentEvent {
            amount: adjusted.amount(),
            ..event.clone()
        })
    }
}
