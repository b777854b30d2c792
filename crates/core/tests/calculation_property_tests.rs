//! Property-based integration tests for the calculators.
//!
//! These tests check invariants that must hold for any input, using the
//! `proptest` crate for random test case generation.

use chrono::NaiveDate;
use moneycalc_core::aggregation::{Aggregation, SlidingWindow};
use moneycalc_core::investments::{Investment, InvestmentAsset, InvestmentEvent, InvestmentType};
use moneycalc_core::rebalancing::{
    buy_side, sell_side, tracking_error, BuyRequest, OpenLot, RebalancingConfig, SellRequest,
};
use moneycalc_core::series::{InterpolationStrategy, MoneyAmountSeries, YearMonth};
use moneycalc_core::{Currency, MoneyAmount};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, VecDeque};

// =============================================================================
// Generators
// =============================================================================

/// Amounts in cents, so every value is exact at the working precision.
fn arb_cents(max: i64) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_signed_cents() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

const TICKERS: [Currency; 3] = [Currency::CSPX, Currency::RTWO, Currency::EIMI];

/// Weights in whole percent that add up to one.
fn arb_weights() -> impl Strategy<Value = BTreeMap<Currency, Decimal>> {
    (0u32..=100, 0u32..=100).prop_map(|(a, b)| {
        let first = a.min(b);
        let second = a.max(b) - first;
        let third = 100 - first - second;
        TICKERS
            .iter()
            .zip([first, second, third])
            .map(|(ticker, pct)| (*ticker, Decimal::new(i64::from(pct), 2)))
            .collect()
    })
}

fn arb_values(max_cents: i64) -> impl Strategy<Value = BTreeMap<Currency, Decimal>> {
    (arb_cents(max_cents), arb_cents(max_cents), arb_cents(max_cents))
        .prop_map(|(a, b, c)| TICKERS.iter().copied().zip([a, b, c]).collect())
}

fn arb_prices() -> impl Strategy<Value = BTreeMap<Currency, Decimal>> {
    (1i64..=500, 1i64..=500, 1i64..=500).prop_map(|(a, b, c)| {
        TICKERS
            .iter()
            .copied()
            .zip([a, b, c].map(Decimal::from))
            .collect()
    })
}

fn config(weights: BTreeMap<Currency, Decimal>) -> RebalancingConfig {
    let groups = TICKERS.iter().map(|t| (*t, vec![*t])).collect();
    RebalancingConfig::new(weights, groups, Decimal::new(15, 2)).unwrap()
}

fn open_lot(currency: Currency, day: u32, value: Decimal) -> OpenLot {
    let event = InvestmentEvent {
        date: NaiveDate::from_ymd_opt(2023, 1, day).unwrap(),
        amount: value,
        currency: Currency::USD,
        fee: Decimal::ZERO,
        transfer_fee: Decimal::ZERO,
        fx: None,
    };
    OpenLot {
        investment: Investment {
            investment_type: InvestmentType::ETF,
            entry: event.clone(),
            exit: None,
            asset: InvestmentAsset {
                currency,
                amount: Decimal::ONE,
            },
            comment: None,
        },
        value,
        cost_basis: value,
        exit: event,
    }
}

fn arb_lots() -> impl Strategy<Value = Vec<OpenLot>> {
    prop::collection::vec((0usize..3, 1i64..=10_000), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (ticker, cents))| {
                open_lot(TICKERS[ticker], (i as u32) + 1, Decimal::new(cents, 2))
            })
            .collect()
    })
}

fn group(lots: Vec<OpenLot>) -> BTreeMap<Currency, VecDeque<OpenLot>> {
    let mut grouped: BTreeMap<Currency, VecDeque<OpenLot>> = BTreeMap::new();
    for lot in lots {
        grouped
            .entry(lot.investment.currency())
            .or_default()
            .push_back(lot);
    }
    grouped
}

// =============================================================================
// Money and series
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Adding and then subtracting the same amount gives the original back.
    #[test]
    fn prop_add_subtract_round_trip(a in arb_signed_cents(), b in arb_signed_cents()) {
        let x = MoneyAmount::new(a, Currency::EUR);
        let y = MoneyAmount::new(b, Currency::EUR);
        let back = x.add(&y).unwrap().subtract(&y).unwrap();
        prop_assert_eq!(back, x);
    }

    /// Mixing currencies is always rejected.
    #[test]
    fn prop_mixed_currency_add_fails(a in arb_signed_cents(), b in arb_signed_cents()) {
        let x = MoneyAmount::new(a, Currency::EUR);
        let y = MoneyAmount::new(b, Currency::USD);
        prop_assert!(x.add(&y).is_err());
    }

    /// A one-month window averages every month to itself.
    #[test]
    fn prop_unit_window_average_is_identity(
        values in prop::collection::vec(arb_signed_cents(), 1..36),
    ) {
        let start = YearMonth::new(2020, 1).unwrap();
        let series = MoneyAmountSeries::from_points(
            "income",
            Currency::USD,
            values.iter().enumerate().map(|(i, v)| (start.plus_months(i as i64), *v)),
            InterpolationStrategy::NoInterpolation,
        ).unwrap();
        let averaged = SlidingWindow::new(1).unwrap().average(&series).unwrap();
        prop_assert_eq!(
            averaged.items().collect::<Vec<_>>(),
            series.items().collect::<Vec<_>>()
        );
    }
}

// =============================================================================
// Rebalancing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// What is spent plus what is left equals the contribution, and nothing goes negative.
    #[test]
    fn prop_buy_conserves_the_contribution(
        weights in arb_weights(),
        values in arb_values(1_000_000),
        prices in arb_prices(),
        contribution in (1i64..=5_000).prop_map(Decimal::from),
    ) {
        let request = BuyRequest {
            currency: Currency::USD,
            values,
            prices: prices.clone(),
            contribution,
            transfer_fee: Decimal::ONE,
            as_of: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            lot_comment: "lse".to_string(),
        };
        let result = buy_side::rebalance(&weights, &request).unwrap();

        let spent = buy_side::spent(&result.shares, &prices).unwrap();
        prop_assert_eq!(spent + result.remainder, contribution);
        prop_assert!(result.remainder >= Decimal::ZERO);
        for count in result.shares.values() {
            prop_assert!(*count > Decimal::ZERO);
            prop_assert_eq!(count.fract(), Decimal::ZERO);
        }
        prop_assert_eq!(result.lots.len(), result.shares.len());
    }

    /// Every greedy purchase strictly lowers the tracking error.
    #[test]
    fn prop_greedy_steps_reduce_tracking_error(
        weights in arb_weights(),
        values in arb_values(100_000),
        prices in arb_prices(),
        remainder in (0i64..=2_000).prop_map(Decimal::from),
    ) {
        let (shares, left, steps) =
            buy_side::greedy_top_up(&weights, &values, &prices, BTreeMap::new(), remainder).unwrap();
        for step in &steps {
            prop_assert!(step.after < step.before);
        }
        prop_assert!(left >= Decimal::ZERO);
        let bought: Decimal = shares.values().sum();
        prop_assert_eq!(bought, Decimal::from(steps.len()));
    }

    /// Tracking error is never negative.
    #[test]
    fn prop_tracking_error_is_non_negative(
        weights in arb_weights(),
        values in arb_values(1_000_000),
    ) {
        prop_assert!(tracking_error(&weights, &values) >= Decimal::ZERO);
    }

    /// Selling terminates after at most one round per lot with a monotone running total.
    #[test]
    fn prop_sell_terminates_and_progress_is_monotone(
        weights in arb_weights(),
        lots in arb_lots(),
        withdrawal in arb_cents(100_000),
        allow_oversell in any::<bool>(),
    ) {
        let lot_count = lots.len();
        let request = SellRequest {
            withdrawal,
            allow_oversell,
            capital_gains_tax_rate: Decimal::new(15, 2),
            lots: group(lots),
        };
        let result = sell_side::rebalance(&config(weights), &request).unwrap();

        prop_assert!(result.sold_lots.len() <= lot_count);
        prop_assert_eq!(result.progress.len(), result.sold_lots.len());
        prop_assert!(result.progress.windows(2).all(|w| w[0] <= w[1]));
        if !allow_oversell {
            prop_assert!(result.sold <= withdrawal);
        } else if result.sold < withdrawal {
            prop_assert_eq!(result.sold_lots.len(), lot_count);
        }
    }
}
