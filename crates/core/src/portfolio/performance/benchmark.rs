//! Replays the ledger as if every lot had bought a benchmark instead.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::performance_model::SeenPrice;
use crate::errors::{CalculatorError, Result};
use crate::fx::CurrencyConverter;
use crate::investments::{Investment, InvestmentAsset, InvestmentEvent};
use crate::money::decimal_context as ctx;
use crate::money::{Currency, MoneyAmount};
use crate::series::YearMonth;

/// Rewrites lots as the same cash put into `benchmark` on the same day.
///
/// Share counts come from a USD price seen that day when there is one, either
/// a ledger purchase of the benchmark itself or a recorded price. Otherwise the
/// converter prices the benchmark at the entry month. Sales become USD exits
/// priced the same way.
pub struct BenchmarkMapper<'a> {
    fx: &'a CurrencyConverter,
    benchmark: Currency,
    seen_prices: BTreeMap<NaiveDate, Decimal>,
}

impl<'a> BenchmarkMapper<'a> {
    /// Recorded prices win over prices derived from the ledger on the same day.
    pub fn new(
        fx: &'a CurrencyConverter,
        benchmark: Currency,
        investments: &[Investment],
        recorded: &[SeenPrice],
    ) -> Self {
        let mut seen_prices = BTreeMap::new();
        for investment in investments.iter().filter(|inv| inv.currency() == benchmark) {
            if let Some(price) = purchase_price(investment) {
                seen_prices.entry(investment.initial_date()).or_insert(price);
            }
        }
        for seen in recorded {
            seen_prices.insert(seen.date, seen.price);
        }
        Self {
            fx,
            benchmark,
            seen_prices,
        }
    }

    pub fn benchmark(&self) -> Currency {
        self.benchmark
    }

    fn seen_price(&self, date: NaiveDate) -> Option<Decimal> {
        self.seen_prices
            .get(&date)
            .copied()
            .filter(|price| *price > Decimal::ZERO)
    }

    fn usd_invested(&self, entry: &InvestmentEvent) -> Result<Decimal> {
        match entry.fx {
            Some(fx) => Ok(ctx::mul(entry.amount, fx)),
            None => Ok(self
                .fx
                .exchange(&entry.money_amount(), Currency::USD, YearMonth::from_date(entry.date))?
                .amount()),
        }
    }

    fn shares(&self, entry: &InvestmentEvent) -> Result<Decimal> {
        if let Some(price) = self.seen_price(entry.date) {
            let usd = self.usd_invested(entry)?;
            return ctx::div(usd, price).ok_or_else(|| {
                CalculatorError::Calculation(format!("{} shares at {}", self.benchmark, price)).into()
            });
        }
        if self.benchmark == Currency::USD {
            return self.usd_invested(entry);
        }
        Ok(self
            .fx
            .exchange(&entry.money_amount(), self.benchmark, YearMonth::from_date(entry.date))?
            .amount())
    }

    fn exit(&self, out: &InvestmentEvent, shares: Decimal) -> Result<InvestmentEvent> {
        let amount = if self.benchmark == Currency::USD {
            shares
        } else if let Some(price) = self.seen_price(out.date) {
            ctx::mul(shares, price)
        } else {
            self.fx
                .exchange(
                    &MoneyAmount::new(shares, self.benchmark),
                    Currency::USD,
                    YearMonth::from_date(out.date),
                )?
                .amount()
        };
        Ok(InvestmentEvent {
            date: out.date,
            amount,
            currency: Currency::USD,
            fee: out.fee,
            transfer_fee: out.transfer_fee,
            fx: None,
        })
    }

    /// Lots already holding the benchmark are returned unchanged.
    pub fn map(&self, investment: &Investment) -> Result<Investment> {
        if investment.currency() == self.benchmark {
            return Ok(investment.clone());
        }
        let shares = self.shares(&investment.entry)?;
        let exit = investment
            .exit
            .as_ref()
            .map(|out| self.exit(out, shares))
            .transpose()?;
        debug!(
            "{} lot of {} becomes {} {}",
            investment.currency(),
            investment.initial_date(),
            shares,
            self.benchmark
        );
        Ok(Investment {
            investment_type: investment.investment_type,
            entry: investment.entry.clone(),
            exit,
            asset: InvestmentAsset {
                currency: self.benchmark,
                amount: shares,
            },
            comment: investment.comment.clone(),
        })
    }

    /// Every lot mapped, oldest entry first.
    pub fn map_all(&self, investments: &[Investment]) -> Result<Vec<Investment>> {
        let mut mapped = investments
            .iter()
            .map(|investment| self.map(investment))
            .collect::<Result<Vec<_>>>()?;
        mapped.sort_by_key(Investment::initial_date);
        Ok(mapped)
    }
}

/// USD paid per share, when the entry is in USD or carries a locked rate.
fn purchase_price(investment: &Investment) -> Option<Decimal> {
    let entry = &investment.entry;
    let usd = match (entry.fx, entry.currency) {
        (Some(fx), _) => ctx::mul(entry.amount, fx),
        (None, Currency::USD) => entry.amount,
        _ => return None,
    };
    ctx::div(usd, investment.asset.amount).filter(|price| *price > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::ExchangeRateSeries;
    use crate::investments::InvestmentType;
    use crate::series::IndexSeries;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    /// CSPX at 500, 400, 520 USD in 2024-01..03; EUR at 1.1 USD.
    fn converter() -> CurrencyConverter {
        let cspx = IndexSeries::from_points(
            "CSPX/USD",
            vec![(ym(2024, 1), dec!(500)), (ym(2024, 2), dec!(400)), (ym(2024, 3), dec!(520))],
        )
        .unwrap();
        CurrencyConverter::new(vec![
            ExchangeRateSeries::new(Currency::CSPX, Currency::USD, cspx),
            ExchangeRateSeries::constant(Currency::EUR, Currency::USD, dec!(1.1)),
        ])
        .unwrap()
    }

    fn event(on: NaiveDate, amount: Decimal, currency: Currency) -> InvestmentEvent {
        InvestmentEvent {
            date: on,
            amount,
            currency,
            fee: Decimal::ZERO,
            transfer_fee: Decimal::ZERO,
            fx: None,
        }
    }

    fn lot(on: NaiveDate, cost: Decimal, ticker: Currency, shares: Decimal) -> Investment {
        Investment {
            investment_type: InvestmentType::ETF,
            entry: event(on, cost, Currency::USD),
            exit: None,
            asset: InvestmentAsset {
                currency: ticker,
                amount: shares,
            },
            comment: Some("lse".to_string()),
        }
    }

    #[test]
    fn test_benchmark_lots_are_unchanged() {
        let fx = converter();
        let cspx = lot(date(2024, 1, 10), dec!(1000), Currency::CSPX, dec!(2));
        let mapper = BenchmarkMapper::new(&fx, Currency::CSPX, &[cspx.clone()], &[]);
        assert_eq!(mapper.map(&cspx).unwrap(), cspx);
    }

    #[test]
    fn test_same_day_purchase_sets_the_price() {
        let fx = converter();
        let ledger = vec![
            lot(date(2024, 1, 10), dec!(1000), Currency::CSPX, dec!(2)),
            lot(date(2024, 1, 10), dec!(600), Currency::EIMI, dec!(20)),
        ];
        let mapper = BenchmarkMapper::new(&fx, Currency::CSPX, &ledger, &[]);

        let mapped = mapper.map(&ledger[1]).unwrap();
        assert_eq!(mapped.asset.currency, Currency::CSPX);
        assert_eq!(mapped.asset.amount, dec!(1.2));
        assert_eq!(mapped.entry, ledger[1].entry);
        assert_eq!(mapped.comment.as_deref(), Some("lse"));
    }

    #[test]
    fn test_recorded_price_wins_and_locked_fx_is_used() {
        let fx = converter();
        let ledger = vec![lot(date(2024, 1, 10), dec!(1000), Currency::CSPX, dec!(2))];
        let recorded = [SeenPrice {
            date: date(2024, 1, 10),
            price: dec!(550),
        }];
        let mapper = BenchmarkMapper::new(&fx, Currency::CSPX, &ledger, &recorded);

        let mut euro_lot = lot(date(2024, 1, 10), dec!(1000), Currency::MEUD, dec!(4));
        euro_lot.entry.currency = Currency::EUR;
        euro_lot.entry.fx = Some(dec!(1.1));
        assert_eq!(mapper.map(&euro_lot).unwrap().asset.amount, dec!(2));
    }

    #[test]
    fn test_converter_prices_unseen_days() {
        let fx = converter();
        let mapper = BenchmarkMapper::new(&fx, Currency::CSPX, &[], &[]);

        let usd_lot = lot(date(2024, 2, 5), dec!(800), Currency::EIMI, dec!(30));
        assert_eq!(mapper.map(&usd_lot).unwrap().asset.amount, dec!(2));

        let late = lot(date(2024, 7, 1), dec!(800), Currency::EIMI, dec!(30));
        assert!(mapper.map(&late).is_err());
    }

    #[test]
    fn test_exit_is_rewritten_in_usd() {
        let fx = converter();
        let mapper = BenchmarkMapper::new(&fx, Currency::CSPX, &[], &[]);

        let mut sold = lot(date(2024, 2, 5), dec!(800), Currency::EIMI, dec!(30));
        sold.exit = Some(InvestmentEvent {
            date: date(2024, 3, 15),
            amount: dec!(900),
            currency: Currency::EUR,
            fee: dec!(1),
            transfer_fee: dec!(2),
            fx: Some(dec!(1.1)),
        });
        let exit = mapper.map(&sold).unwrap().exit.unwrap();

        assert_eq!(exit.amount, dec!(1040));
        assert_eq!(exit.currency, Currency::USD);
        assert_eq!(exit.fx, None);
        assert_eq!((exit.fee, exit.transfer_fee), (dec!(1), dec!(2)));
    }

    #[test]
    fn test_usd_benchmark_keeps_the_cash() {
        let fx = converter();
        let mapper = BenchmarkMapper::new(&fx, Currency::USD, &[], &[]);

        let mut sold = lot(date(2024, 2, 5), dec!(1000), Currency::EIMI, dec!(30));
        sold.entry.currency = Currency::EUR;
        sold.exit = Some(event(date(2024, 3, 15), dec!(1500), Currency::EUR));
        let mapped = mapper.map(&sold).unwrap();

        assert_eq!(mapped.asset.amount, dec!(1100));
        assert_eq!(mapped.exit.unwrap().amount, dec!(1100));
    }

    #[test]
    fn test_map_all_orders_by_entry_date() {
        let fx = converter();
        let mapper = BenchmarkMapper::new(&fx, Currency::CSPX, &[], &[]);
        let ledger = vec![
            lot(date(2024, 2, 1), dec!(400), Currency::EIMI, dec!(10)),
            lot(date(2024, 1, 2), dec!(500), Currency::EIMI, dec!(10)),
        ];
        let mapped = mapper.map_all(&ledger).unwrap();
        let dates: Vec<NaiveDate> = mapped.iter().map(Investment::initial_date).collect();
        assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 2, 1)]);
        assert!(mapped.iter().all(|inv| inv.asset.amount == dec!(1)));
    }
}
