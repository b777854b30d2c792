//! Buy-only greedy proportional rebalancing.
//!
//! A contribution is first split across the under-weight tickers in
//! proportion to their deficits, rounded down to whole shares. Whatever is
//! left is then spent one share at a time on the ticker that lowers the
//! tracking error the most, until nothing affordable improves it.

use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::rebalancing_model::{BuyRequest, BuyResult, GreedyStep};
use super::tracking_error::tracking_error;
use crate::errors::{CalculatorError, Error, Result};
use crate::investments::{Investment, InvestmentAsset, InvestmentEvent, InvestmentType};
use crate::money::decimal_context as ctx;
use crate::money::Currency;

type Amounts = BTreeMap<Currency, Decimal>;

pub fn total_future_value(values: &Amounts, contribution: Decimal) -> Decimal {
    values.values().fold(contribution, |acc, v| ctx::add(acc, *v))
}

pub fn target_values(weights: &Amounts, total: Decimal) -> Amounts {
    weights
        .iter()
        .map(|(currency, weight)| (*currency, ctx::mul(total, *weight)))
        .collect()
}

/// Positive shortfalls against the targets; tickers at or above target are left out.
pub fn deficits(targets: &Amounts, values: &Amounts) -> Amounts {
    targets
        .iter()
        .filter_map(|(currency, target)| {
            let value = values.get(currency).copied().unwrap_or(Decimal::ZERO);
            let deficit = ctx::sub(*target, value);
            (deficit > Decimal::ZERO).then_some((*currency, deficit))
        })
        .collect()
}

/// The contribution split in proportion to the deficits.
pub fn allocations(contribution: Decimal, deficits: &Amounts) -> Amounts {
    let total = deficits
        .values()
        .fold(Decimal::ZERO, |acc, d| ctx::add(acc, *d));
    deficits
        .iter()
        .filter_map(|(currency, deficit)| {
            ctx::div(*deficit, total).map(|share| (*currency, ctx::mul(contribution, share)))
        })
        .collect()
}

pub fn whole_shares(allocations: &Amounts, prices: &Amounts) -> Result<Amounts> {
    allocations
        .iter()
        .map(|(currency, allocation)| {
            let price = price_of(prices, *currency)?;
            let shares = ctx::div(*allocation, price)
                .ok_or(CalculatorError::NonPositivePrice(*currency))?
                .floor();
            Ok((*currency, shares))
        })
        .collect()
}

pub fn spent(shares: &Amounts, prices: &Amounts) -> Result<Decimal> {
    shares.iter().try_fold(Decimal::ZERO, |acc, (currency, count)| {
        Ok(ctx::add(acc, ctx::mul(*count, price_of(prices, *currency)?)))
    })
}

/// Values after buying `shares`.
pub fn values_with(values: &Amounts, shares: &Amounts, prices: &Amounts) -> Result<Amounts> {
    let mut result = values.clone();
    for (currency, count) in shares {
        let bought = ctx::mul(*count, price_of(prices, *currency)?);
        let entry = result.entry(*currency).or_insert(Decimal::ZERO);
        *entry = ctx::add(*entry, bought);
    }
    Ok(result)
}

/// Spends `remainder` one share at a time while a purchase lowers the tracking error.
///
/// Each step takes the affordable ticker with the largest strictly positive
/// reduction; ties go to the ticker that sorts first.
pub fn greedy_top_up(
    weights: &Amounts,
    values: &Amounts,
    prices: &Amounts,
    mut shares: Amounts,
    mut remainder: Decimal,
) -> Result<(Amounts, Decimal, Vec<GreedyStep>)> {
    let mut steps = Vec::new();
    loop {
        let affordable: Vec<(Currency, Decimal)> = prices
            .iter()
            .filter(|(_, price)| **price <= remainder)
            .map(|(currency, price)| (*currency, *price))
            .collect();
        if affordable.is_empty() {
            break;
        }

        let before = tracking_error(weights, &values_with(values, &shares, prices)?);
        let mut best: Option<(Currency, Decimal, Decimal)> = None;
        for (currency, _) in &affordable {
            let mut candidate = shares.clone();
            *candidate.entry(*currency).or_insert(Decimal::ZERO) += Decimal::ONE;
            let after = tracking_error(weights, &values_with(values, &candidate, prices)?);
            let reduction = ctx::sub(before, after);
            let improves = match best {
                Some((_, best_reduction, _)) => reduction > best_reduction,
                None => reduction > Decimal::ZERO,
            };
            if improves {
                best = Some((*currency, reduction, after));
            }
        }

        let Some((currency, _, after)) = best else {
            break;
        };
        let price = price_of(prices, currency)?;
        *shares.entry(currency).or_insert(Decimal::ZERO) += Decimal::ONE;
        remainder = ctx::sub(remainder, price);
        debug!(
            "Greedy step: one {} at {}, tracking error {} -> {}, remainder {}",
            currency, price, before, after, remainder
        );
        steps.push(GreedyStep {
            currency,
            before,
            after,
        });
    }
    Ok((shares, remainder, steps))
}

/// The transfer fee split in proportion to what was spent on each ticker.
pub fn fee_attribution(
    transfer_fee: Decimal,
    shares: &Amounts,
    prices: &Amounts,
    spent: Decimal,
) -> Result<Amounts> {
    if !shares.values().any(|count| *count > Decimal::ZERO) {
        return Ok(Amounts::new());
    }
    shares
        .iter()
        .map(|(currency, count)| {
            let cost = ctx::mul(*count, price_of(prices, *currency)?);
            let share = ctx::div(cost, spent).unwrap_or(Decimal::ZERO);
            Ok((*currency, ctx::mul(transfer_fee, share)))
        })
        .collect()
}

/// Ledger entries for the purchased shares, one per ticker.
pub fn purchase_lots(
    request: &BuyRequest,
    shares: &Amounts,
    fees: &Amounts,
) -> Result<Vec<Investment>> {
    shares
        .iter()
        .filter(|(_, count)| **count > Decimal::ZERO)
        .map(|(currency, count)| {
            let price = price_of(&request.prices, *currency)?;
            Ok(Investment {
                investment_type: InvestmentType::ETF,
                entry: InvestmentEvent {
                    date: request.as_of,
                    amount: ctx::mul(*count, price),
                    currency: request.currency,
                    fee: Decimal::ZERO,
                    transfer_fee: fees.get(currency).copied().unwrap_or(Decimal::ZERO),
                    fx: None,
                },
                exit: None,
                asset: InvestmentAsset {
                    currency: *currency,
                    amount: *count,
                },
                comment: Some(request.lot_comment.clone()),
            })
        })
        .collect()
}

fn price_of(prices: &Amounts, currency: Currency) -> Result<Decimal> {
    let price = prices
        .get(&currency)
        .copied()
        .ok_or(CalculatorError::MissingPrice(currency))?;
    if price <= Decimal::ZERO {
        return Err(CalculatorError::NonPositivePrice(currency).into());
    }
    Ok(price)
}

fn ensure_not_negative(what: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "{} must not be negative, got {}",
            what, amount
        )));
    }
    Ok(())
}

/// Runs every step for `request` against the target `weights`.
pub fn rebalance(weights: &Amounts, request: &BuyRequest) -> Result<BuyResult> {
    ensure_not_negative("contribution", request.contribution)?;
    ensure_not_negative("transfer fee", request.transfer_fee)?;
    for (currency, value) in &request.values {
        ensure_not_negative(&format!("value of {}", currency), *value)?;
    }

    let prices: Amounts = weights
        .keys()
        .map(|currency| Ok((*currency, price_of(&request.prices, *currency)?)))
        .collect::<Result<_>>()?;
    let values: Amounts = weights
        .keys()
        .map(|currency| {
            let value = request.values.get(currency).copied().unwrap_or(Decimal::ZERO);
            (*currency, value)
        })
        .collect();

    let total = total_future_value(&values, request.contribution);
    let targets = target_values(weights, total);
    let deficits = deficits(&targets, &values);
    let allocations = allocations(request.contribution, &deficits);
    let shares = whole_shares(&allocations, &prices)?;
    let remainder = ctx::sub(request.contribution, spent(&shares, &prices)?);

    let (shares, remainder, steps) = greedy_top_up(weights, &values, &prices, shares, remainder)?;

    let fees = fee_attribution(
        request.transfer_fee,
        &shares,
        &prices,
        ctx::sub(request.contribution, remainder),
    )?;
    let final_values = values_with(&values, &shares, &prices)?;
    let lots = purchase_lots(request, &shares, &fees)?;

    Ok(BuyResult {
        currency: request.currency,
        initial_values: values,
        contribution: request.contribution,
        final_values,
        shares: shares
            .into_iter()
            .filter(|(_, count)| *count > Decimal::ZERO)
            .collect(),
        remainder,
        fee_attribution: fees,
        steps,
        lots,
    })
}
