use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, VecDeque};

use super::buy_side;
use super::rebalancing_model::{
    BuyRequest, BuyResult, OpenLot, RebalancingConfig, SellRequest, SellResult,
};
use super::sell_side;
use crate::context::MarketContext;
use crate::errors::{Error, Result};
use crate::investments::{Investment, InvestmentEvent};
use crate::money::decimal_context as ctx;
use crate::money::{Currency, MoneyAmount};
use crate::series::YearMonth;

/// Service that rebalances the ETF lots of the ledger toward the configured weights.
///
/// Holdings are the ETF lots still open on the evaluation date, valued in USD
/// at that month's rates and summed per equivalence group.
pub struct RebalancingService<'a> {
    market: MarketContext<'a>,
    config: &'a RebalancingConfig,
    investments: &'a [Investment],
}

impl<'a> RebalancingService<'a> {
    pub fn new(
        market: MarketContext<'a>,
        config: &'a RebalancingConfig,
        investments: &'a [Investment],
    ) -> Self {
        Self {
            market,
            config,
            investments,
        }
    }

    fn month(&self) -> YearMonth {
        YearMonth::from_date(self.market.as_of)
    }

    fn usd_value(&self, amount: &MoneyAmount, month: YearMonth) -> Result<Decimal> {
        if amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        Ok(self
            .market
            .fx
            .exchange(amount, Currency::USD, month)?
            .amount())
    }

    /// Open ETF lots whose ticker belongs to an equivalence group, in ledger order.
    fn open_lots(&self) -> impl Iterator<Item = &'a Investment> + '_ {
        let as_of = self.market.as_of;
        self.investments
            .iter()
            .filter(move |inv| inv.is_etf() && inv.is_current(as_of))
            .filter(move |inv| {
                let grouped = self.config.canonical(inv.currency()).is_some();
                if !grouped {
                    debug!("Skipping {} lot outside the target allocation", inv.currency());
                }
                grouped
            })
    }

    /// USD value held per canonical ticker.
    pub fn holdings(&self) -> Result<BTreeMap<Currency, Decimal>> {
        let mut quantities: BTreeMap<Currency, Decimal> = BTreeMap::new();
        for lot in self.open_lots() {
            let entry = quantities.entry(lot.currency()).or_insert(Decimal::ZERO);
            *entry = ctx::add(*entry, lot.asset.amount);
        }

        let month = self.month();
        let mut values: BTreeMap<Currency, Decimal> = self
            .config
            .weights()
            .keys()
            .map(|canonical| (*canonical, Decimal::ZERO))
            .collect();
        for (ticker, quantity) in quantities {
            let value = self.usd_value(&MoneyAmount::new(quantity, ticker), month)?;
            if let Some(canonical) = self.config.canonical(ticker) {
                let entry = values.entry(canonical).or_insert(Decimal::ZERO);
                *entry = ctx::add(*entry, value);
            }
        }
        Ok(values)
    }

    /// USD price of one unit of each canonical ticker.
    pub fn prices(&self) -> Result<BTreeMap<Currency, Decimal>> {
        let month = self.month();
        self.config
            .weights()
            .keys()
            .map(|canonical| {
                let price = self
                    .market
                    .fx
                    .rate(*canonical, Currency::USD, month)?;
                Ok((*canonical, price))
            })
            .collect()
    }

    /// Plans the purchase of `usd` plus `eur` (converted at this month's rate).
    pub fn buy(&self, usd: Decimal, eur: Decimal, transfer_fee: Decimal) -> Result<BuyResult> {
        if usd.is_sign_negative() || eur.is_sign_negative() || transfer_fee.is_sign_negative() {
            return Err(Error::invalid_input(format!(
                "contribution and fee must not be negative (usd {}, eur {}, fee {})",
                usd, eur, transfer_fee
            )));
        }

        let month = self.month();
        let eur_in_usd = self.usd_value(&MoneyAmount::new(eur, Currency::EUR), month)?;
        let mut contribution = ctx::add(eur_in_usd, usd);
        if let Some(max) = self.config.max_contribution() {
            contribution = contribution.min(max);
        }
        if contribution.is_zero() {
            return Err(Error::invalid_input("contribution must be greater than zero"));
        }
        info!("Rebalancing a contribution of USD {}", contribution.round_dp(2));

        let request = BuyRequest {
            currency: Currency::USD,
            values: self.holdings()?,
            prices: self.prices()?,
            contribution,
            transfer_fee,
            as_of: self.market.as_of,
            lot_comment: self.config.lot_comment().to_string(),
        };
        buy_side::rebalance(self.config.weights(), &request)
    }

    /// Plans which lots to sell to raise `withdrawal` USD.
    pub fn sell(&self, withdrawal: Decimal, allow_oversell: bool) -> Result<SellResult> {
        if withdrawal.is_sign_negative() {
            return Err(Error::invalid_input(format!(
                "withdrawal must not be negative, got {}",
                withdrawal
            )));
        }

        let mut ordered: Vec<&Investment> = self.open_lots().collect();
        ordered.sort_by_key(|inv| inv.initial_date());

        let mut lots: BTreeMap<Currency, VecDeque<OpenLot>> = BTreeMap::new();
        for investment in ordered {
            let lot = self.open_lot(investment)?;
            lots.entry(investment.currency()).or_default().push_back(lot);
        }
        info!(
            "Selling up to USD {} from {} open lots",
            withdrawal.round_dp(2),
            lots.values().map(VecDeque::len).sum::<usize>()
        );

        let request = SellRequest {
            withdrawal,
            allow_oversell,
            capital_gains_tax_rate: self.config.capital_gains_tax_rate(),
            lots,
        };
        sell_side::rebalance(self.config, &request)
    }

    fn open_lot(&self, investment: &Investment) -> Result<OpenLot> {
        let month = self.month();
        let value = self.usd_value(&investment.money_amount(), month)?;

        let entry = &investment.entry;
        let cost_basis = match entry.fx {
            Some(fx) => ctx::mul(entry.amount, fx),
            None => self.usd_value(&entry.money_amount(), YearMonth::from_date(entry.date))?,
        };

        let out_currency = investment.initial_currency();
        let out_amount = self
            .market
            .fx
            .exchange(&investment.money_amount(), out_currency, month)?;
        let out_fx = if out_currency == Currency::USD {
            None
        } else {
            Some(self.market.fx.rate(out_currency, Currency::USD, month)?)
        };

        Ok(OpenLot {
            investment: investment.clone(),
            value,
            cost_basis,
            exit: InvestmentEvent {
                date: self.market.as_of,
                amount: out_amount.amount(),
                currency: out_currency,
                fee: Decimal::ZERO,
                transfer_fee: Decimal::ZERO,
                fx: out_fx,
            },
        })
    }
}
