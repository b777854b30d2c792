use chrono::NaiveDate;
use log::debug;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::performance_model::{CashFlow, FlowDirection, ModifiedDietzReturnResult};
use crate::constants::DAYS_PER_YEAR;
use crate::context::MarketContext;
use crate::errors::{CalculatorError, Error, Result};
use crate::investments::{Investment, InvestmentEvent};
use crate::money::decimal_context as ctx;
use crate::money::{Currency, MoneyAmount};
use crate::series::YearMonth;

/// Money-weighted return of a set of investments over a window of days.
///
/// The window is clipped to start no earlier than the first entry and to end
/// no later than the evaluation date of the market context. Portfolio values
/// are taken at month ends; cash flows are weighted by the share of the window
/// remaining after them.
#[derive(Clone, Copy)]
pub struct ModifiedDietzReturn<'a> {
    market: MarketContext<'a>,
    investments: &'a [Investment],
    currency: Currency,
    nominal: bool,
    initial: NaiveDate,
    final_date: NaiveDate,
}

impl<'a> ModifiedDietzReturn<'a> {
    pub fn new(
        market: MarketContext<'a>,
        investments: &'a [Investment],
        currency: Currency,
        nominal: bool,
        initial: NaiveDate,
        final_date: NaiveDate,
    ) -> Result<Self> {
        let earliest = investments
            .iter()
            .map(Investment::initial_date)
            .min()
            .ok_or(CalculatorError::NoInvestments)?;
        if !nominal && market.inflation.currency() != currency {
            return Err(Error::CurrencyMismatch {
                expected: market.inflation.currency(),
                found: currency,
            });
        }
        Ok(Self {
            market,
            investments,
            currency,
            nominal,
            initial: initial.max(earliest),
            final_date: final_date.min(market.as_of),
        })
    }

    /// From the first entry to the last exit, or to the evaluation date while
    /// any lot is still held.
    pub fn for_whole_history(
        market: MarketContext<'a>,
        investments: &'a [Investment],
        currency: Currency,
        nominal: bool,
    ) -> Result<Self> {
        let earliest = investments
            .iter()
            .map(Investment::initial_date)
            .min()
            .ok_or(CalculatorError::NoInvestments)?;
        let latest = investments
            .iter()
            .map(|inv| inv.exit.as_ref().map_or(market.as_of, |out| out.date))
            .max()
            .unwrap_or(market.as_of);
        Self::new(market, investments, currency, nominal, earliest, latest)
    }

    pub fn initial(&self) -> NaiveDate {
        self.initial
    }

    pub fn final_date(&self) -> NaiveDate {
        self.final_date
    }

    fn days(&self) -> i64 {
        (self.final_date - self.initial).num_days()
    }

    fn window(&self, initial: NaiveDate, final_date: NaiveDate) -> Result<Self> {
        Self::new(
            self.market,
            self.investments,
            self.currency,
            self.nominal,
            initial,
            final_date,
        )
    }

    /// Expresses `amount`, observed in `month`, in the report currency and,
    /// for real returns, in the money of the last inflation month.
    fn to_report_money(&self, amount: &MoneyAmount, month: YearMonth) -> Result<Decimal> {
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let converted = self.market.fx.exchange(amount, self.currency, month)?;
        if self.nominal {
            return Ok(converted.amount());
        }
        let inflation = self.market.inflation;
        Ok(inflation
            .adjust(&converted, month, inflation.get_to())?
            .amount())
    }

    /// Value of the lots held at the end of `month`, never below zero.
    pub fn portfolio_value(&self, month: YearMonth) -> Result<Decimal> {
        let at = month.last_day()?;
        let mut total = Decimal::ZERO;
        for investment in self.investments.iter().filter(|inv| inv.is_current(at)) {
            let value = self.to_report_money(&investment.money_amount(), month)?;
            total = ctx::add(total, value);
        }
        Ok(total.max(Decimal::ZERO))
    }

    fn event_value(&self, event: &InvestmentEvent) -> Result<Decimal> {
        let month = YearMonth::from_date(event.date);
        let amount = match event.fx {
            Some(fx) => MoneyAmount::new(ctx::mul(event.amount, fx), Currency::USD),
            None => event.money_amount(),
        };
        self.to_report_money(&amount, month)
    }

    fn weight(&self, date: NaiveDate) -> Result<Decimal> {
        let days = self.days();
        let flow_day = (date - self.initial).num_days();
        ctx::div(Decimal::from(days - flow_day), Decimal::from(days.max(1)))
            .ok_or_else(|| CalculatorError::Calculation("flow weight".to_string()).into())
    }

    /// Entries and exits dated inside the window, oldest first.
    pub fn cash_flows(&self) -> Result<Vec<CashFlow>> {
        let in_window = |date: NaiveDate| date >= self.initial && date <= self.final_date;
        let mut flows = Vec::new();
        for investment in self.investments {
            let events = std::iter::once((&investment.entry, FlowDirection::Inflow))
                .chain(investment.exit.iter().map(|out| (out, FlowDirection::Outflow)));
            for (event, direction) in events.filter(|(event, _)| in_window(event.date)) {
                let value = self.event_value(event)?;
                let amount = match direction {
                    FlowDirection::Inflow => value,
                    FlowDirection::Outflow => -value,
                };
                flows.push(CashFlow {
                    date: event.date,
                    direction,
                    amount,
                    weighted_amount: ctx::mul(amount, self.weight(event.date)?),
                });
            }
        }
        flows.sort_by_key(|flow| flow.date);
        Ok(flows)
    }

    pub fn get(&self) -> Result<ModifiedDietzReturnResult> {
        if self.final_date < self.initial {
            return Ok(ModifiedDietzReturnResult::ZERO);
        }
        let v0 = self.portfolio_value(YearMonth::from_date(self.initial).prev())?;
        let v1 = self.portfolio_value(YearMonth::from_date(self.final_date))?;

        let flows = self.cash_flows()?;
        let sum_flows = flows
            .iter()
            .fold(Decimal::ZERO, |acc, flow| ctx::add(acc, flow.amount));
        let sum_weighted = flows
            .iter()
            .fold(Decimal::ZERO, |acc, flow| ctx::add(acc, flow.weighted_amount));

        if v0.is_zero() && sum_weighted.is_zero() {
            return Ok(ModifiedDietzReturnResult::ZERO);
        }

        let gain = ctx::sub(ctx::sub(v1, v0), sum_flows);
        let money_weighted = ctx::div(gain, ctx::add(v0, sum_weighted))
            .map_or(Decimal::ZERO, |r| r.max(Decimal::NEGATIVE_ONE));

        debug!(
            "dietz {}..{}: v0={} v1={} flows={} weighted={} r={}",
            self.initial, self.final_date, v0, v1, sum_flows, sum_weighted, money_weighted
        );

        Ok(ModifiedDietzReturnResult {
            money_weighted,
            annualized_money_weighted: annualize(money_weighted, self.days())?,
        })
    }

    /// Chains the returns of consecutive month-end windows across the window.
    pub fn monthly_linked(&self) -> Result<ModifiedDietzReturnResult> {
        if self.final_date < self.initial {
            return Ok(ModifiedDietzReturnResult::ZERO);
        }
        let last = YearMonth::from_date(self.final_date);
        let mut month = YearMonth::from_date(self.initial).prev();
        let mut linked = Decimal::ONE;
        while month < last {
            let sub = self.window(month.last_day()?, month.next().last_day()?)?.get()?;
            linked = ctx::mul(linked, ctx::add(Decimal::ONE, sub.money_weighted));
            month = month.next();
        }
        let money_weighted = ctx::sub(linked, Decimal::ONE).max(Decimal::NEGATIVE_ONE);
        Ok(ModifiedDietzReturnResult {
            money_weighted,
            annualized_money_weighted: annualize(money_weighted, self.days())?,
        })
    }
}

/// `(1 + r)^(365 / days) - 1`, capped at a total loss.
fn annualize(total_return: Decimal, days: i64) -> Result<Decimal> {
    if days <= 0 {
        return Ok(Decimal::ZERO);
    }
    let base = Decimal::ONE + total_return;
    if base <= Decimal::ZERO {
        return Ok(dec!(-1));
    }
    let exponent = ctx::div(Decimal::from(DAYS_PER_YEAR), Decimal::from(days))
        .unwrap_or(Decimal::ONE);
    let grown = base.checked_powd(exponent).ok_or_else(|| {
        CalculatorError::Calculation(format!(
            "annualizing {} over {} days overflows",
            total_return, days
        ))
    })?;
    Ok(ctx::sub(grown, Decimal::ONE))
}
