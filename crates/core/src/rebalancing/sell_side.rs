//! Sell-side rebalancing: raise a withdrawal by selling whole lots.
//!
//! Every round simulates selling the oldest lot of each ticker and keeps the
//! sale that leaves the remaining portfolio closest to the target weights.

use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, VecDeque};

use super::rebalancing_model::{OpenLot, RebalancingConfig, SellRequest, SellResult, SoldLot};
use super::tracking_error::tracking_error;
use crate::errors::{Error, Result};
use crate::money::decimal_context as ctx;
use crate::money::Currency;

type Lots = BTreeMap<Currency, VecDeque<OpenLot>>;

/// Value of the remaining lots per canonical ticker.
pub fn virtual_values(config: &RebalancingConfig, lots: &Lots) -> BTreeMap<Currency, Decimal> {
    config
        .equivalences()
        .iter()
        .map(|(canonical, members)| {
            let value = members
                .iter()
                .filter_map(|member| lots.get(member))
                .flatten()
                .fold(Decimal::ZERO, |acc, lot| ctx::add(acc, lot.value));
            (*canonical, value)
        })
        .collect()
}

/// The lots left after selling the oldest lot of `currency`, and that lot.
pub fn selling_oldest(lots: &Lots, currency: Currency) -> Option<(Lots, OpenLot)> {
    let mut remaining = lots.clone();
    let sold = remaining.get_mut(&currency)?.pop_front()?;
    Some((remaining, sold))
}

fn has_lots(lots: &Lots) -> bool {
    lots.values().any(|queue| !queue.is_empty())
}

pub fn rebalance(config: &RebalancingConfig, request: &SellRequest) -> Result<SellResult> {
    if request.withdrawal.is_sign_negative() {
        return Err(Error::invalid_input(format!(
            "withdrawal must not be negative, got {}",
            request.withdrawal
        )));
    }

    let mut lots = request.lots.clone();
    let initial_values = virtual_values(config, &lots);
    let mut sold = Decimal::ZERO;
    let mut progress = Vec::new();
    let mut sold_lots = Vec::new();
    let mut out_events = Vec::new();
    let mut capital_gains = Decimal::ZERO;

    while has_lots(&lots) && sold < request.withdrawal {
        let mut best: Option<(Lots, OpenLot, Decimal)> = None;
        for currency in lots.keys() {
            let Some((remaining, lot)) = selling_oldest(&lots, *currency) else {
                continue;
            };
            let oversold = ctx::add(sold, lot.value) > request.withdrawal;
            if oversold && !request.allow_oversell {
                continue;
            }
            let error = tracking_error(config.weights(), &virtual_values(config, &remaining));
            if best.as_ref().map_or(true, |(_, _, lowest)| error < *lowest) {
                best = Some((remaining, lot, error));
            }
        }

        let Some((remaining, lot, error)) = best else {
            debug!("No lot can be sold without exceeding {}", request.withdrawal);
            break;
        };

        sold = ctx::add(sold, lot.value);
        capital_gains = ctx::add(capital_gains, ctx::sub(lot.value, lot.cost_basis));
        debug!(
            "Sell {} {} bought on {} for {}, tracking error {}",
            lot.investment.asset.amount,
            lot.investment.currency(),
            lot.investment.initial_date(),
            lot.value,
            error
        );

        progress.push(sold);
        sold_lots.push(SoldLot {
            currency: lot.investment.currency(),
            initial_date: lot.investment.initial_date(),
            quantity: lot.investment.asset.amount,
            value: lot.value,
            cost_basis: lot.cost_basis,
            tracking_error: error,
        });
        out_events.push(lot.exit);
        lots = remaining;
    }

    let capital_gains_tax = ctx::mul(capital_gains, request.capital_gains_tax_rate);
    Ok(SellResult {
        withdrawal: request.withdrawal,
        initial_values,
        final_values: virtual_values(config, &lots),
        sold_lots,
        progress,
        sold,
        capital_gains_tax,
        net: ctx::sub(sold, capital_gains_tax),
        out_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investments::{Investment, InvestmentAsset, InvestmentEvent, InvestmentType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn config() -> RebalancingConfig {
        RebalancingConfig::new(
            BTreeMap::from([(Currency::CSPX, dec!(0.5)), (Currency::EIMI, dec!(0.5))]),
            BTreeMap::from([
                (Currency::CSPX, vec![Currency::CSPX, Currency::SXR8]),
                (Currency::EIMI, vec![Currency::EIMI]),
            ]),
            dec!(0.1),
        )
        .unwrap()
    }

    fn event(day: u32, amount: Decimal) -> InvestmentEvent {
        InvestmentEvent {
            date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
            amount,
            currency: Currency::USD,
            fee: Decimal::ZERO,
            transfer_fee: Decimal::ZERO,
            fx: None,
        }
    }

    fn lot(currency: Currency, day: u32, cost: Decimal, value: Decimal) -> OpenLot {
        OpenLot {
            investment: Investment {
                investment_type: InvestmentType::ETF,
                entry: event(day, cost),
                exit: None,
                asset: InvestmentAsset {
                    currency,
                    amount: dec!(1),
                },
                comment: None,
            },
            value,
            cost_basis: cost,
            exit: event(28, value),
        }
    }

    fn request(withdrawal: Decimal, allow_oversell: bool, lots: Vec<OpenLot>) -> SellRequest {
        let mut grouped: Lots = BTreeMap::new();
        for lot in lots {
            grouped
                .entry(lot.investment.currency())
                .or_default()
                .push_back(lot);
        }
        SellRequest {
            withdrawal,
            allow_oversell,
            capital_gains_tax_rate: dec!(0.1),
            lots: grouped,
        }
    }

    #[test]
    fn test_sells_overweight_ticker_first() {
        let request = request(
            dec!(100),
            false,
            vec![
                lot(Currency::CSPX, 1, dec!(80), dec!(100)),
                lot(Currency::SXR8, 2, dec!(80), dec!(100)),
                lot(Currency::EIMI, 3, dec!(100), dec!(100)),
            ],
        );
        let result = rebalance(&config(), &request).unwrap();

        assert_eq!(result.sold, dec!(100));
        assert_eq!(result.sold_lots.len(), 1);
        assert_eq!(result.sold_lots[0].currency, Currency::CSPX);
        assert_eq!(result.initial_values[&Currency::CSPX], dec!(200));
        assert_eq!(result.final_values[&Currency::CSPX], dec!(100));
        assert_eq!(result.capital_gains_tax, dec!(2));
        assert_eq!(result.net, dec!(98));
        assert_eq!(result.out_events.len(), 1);
    }

    #[test]
    fn test_without_oversell_stops_short() {
        let request = request(
            dec!(150),
            false,
            vec![
                lot(Currency::CSPX, 1, dec!(100), dec!(100)),
                lot(Currency::EIMI, 2, dec!(100), dec!(100)),
            ],
        );
        let result = rebalance(&config(), &request).unwrap();
        assert_eq!(result.sold, dec!(100));
        assert_eq!(result.progress, vec![dec!(100)]);
    }

    #[test]
    fn test_oversell_covers_the_withdrawal() {
        let request = request(
            dec!(150),
            true,
            vec![
                lot(Currency::CSPX, 1, dec!(100), dec!(100)),
                lot(Currency::EIMI, 2, dec!(100), dec!(100)),
            ],
        );
        let result = rebalance(&config(), &request).unwrap();
        assert_eq!(result.sold, dec!(200));
        assert_eq!(result.progress, vec![dec!(100), dec!(200)]);
        assert!(result.final_values.values().all(|v| v.is_zero()));
    }

    #[test]
    fn test_progress_is_monotone_and_bounded_by_lot_count() {
        let lots: Vec<OpenLot> = (1..=6)
            .map(|day| {
                let currency = if day % 2 == 0 { Currency::CSPX } else { Currency::EIMI };
                lot(currency, day, dec!(10), Decimal::from(day))
            })
            .collect();
        let request = request(dec!(1000), true, lots);
        let result = rebalance(&config(), &request).unwrap();

        assert!(result.sold_lots.len() <= 6);
        assert!(result.progress.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.sold, dec!(21));
    }

    #[test]
    fn test_lots_leave_oldest_first() {
        let request = request(
            dec!(1),
            true,
            vec![
                lot(Currency::EIMI, 5, dec!(1), dec!(1)),
                lot(Currency::EIMI, 9, dec!(1), dec!(1)),
            ],
        );
        let result = rebalance(&config(), &request).unwrap();
        assert_eq!(
            result.sold_lots[0].initial_date,
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_negative_withdrawal_is_rejected() {
        let request = request(dec!(-1), false, Vec::new());
        assert!(rebalance(&config(), &request).is_err());
    }
}
