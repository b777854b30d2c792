use rust_decimal::Decimal;
use std::collections::VecDeque;

use super::aggregation_traits::Aggregation;
use crate::errors::{Error, Result};
use crate::money::decimal_context as ctx;
use crate::money::MoneyAmount;
use crate::series::{IndexSeries, MoneyAmountSeries, YearMonth};

/// Trailing windows that are allowed to be short at the start of the series.
///
/// Every month of the input gets a value; the first months aggregate over
/// however many values exist so far.
#[derive(Debug, Clone, Copy)]
pub struct SimpleAggregation {
    months: usize,
}

impl SimpleAggregation {
    pub fn new(months: usize) -> Result<Self> {
        if months == 0 {
            return Err(Error::invalid_input("window must span at least one month"));
        }
        Ok(Self { months })
    }

    /// Calls `f` with each month and the values of its (possibly short) window,
    /// oldest first.
    fn scan<F, T>(&self, series: &MoneyAmountSeries, window_len: usize, mut f: F) -> Result<Vec<(YearMonth, T)>>
    where
        F: FnMut(&VecDeque<Decimal>) -> Result<T>,
    {
        let mut window: VecDeque<Decimal> = VecDeque::with_capacity(window_len + 1);
        let mut out = Vec::with_capacity(series.len());
        for (ym, amount) in series.items() {
            window.push_back(amount.amount());
            if window.len() > window_len {
                window.pop_front();
            }
            out.push((ym, f(&window)?));
        }
        Ok(out)
    }

    fn collect(
        series: &MoneyAmountSeries,
        label: &str,
        months: usize,
        points: Vec<(YearMonth, Decimal)>,
    ) -> Result<MoneyAmountSeries> {
        let mut result = MoneyAmountSeries::new(
            format!("{} {}({})", series.name(), label, months),
            series.currency(),
        );
        for (ym, value) in points {
            result.put_amount(ym, MoneyAmount::new(value, series.currency()))?;
        }
        Ok(result)
    }
}

fn total(window: &VecDeque<Decimal>) -> Decimal {
    window.iter().fold(Decimal::ZERO, |acc, v| ctx::add(acc, *v))
}

fn oldest_and_newest(window: &VecDeque<Decimal>) -> (Decimal, Decimal) {
    let oldest = window.front().copied().unwrap_or(Decimal::ZERO);
    let newest = window.back().copied().unwrap_or(Decimal::ZERO);
    (oldest, newest)
}

impl Aggregation for SimpleAggregation {
    fn average(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        let points = self.scan(series, self.months, |window| {
            ctx::div(total(window), Decimal::from(window.len()))
                .ok_or_else(|| Error::invalid_input("empty window"))
        })?;
        Self::collect(series, "avg", self.months, points)
    }

    fn sum(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        let points = self.scan(series, self.months, |window| Ok(total(window)))?;
        Self::collect(series, "sum", self.months, points)
    }

    fn change(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        let points = self.scan(series, self.months + 1, |window| {
            let (oldest, newest) = oldest_and_newest(window);
            Ok(ctx::sub(newest, oldest))
        })?;
        Self::collect(series, "change", self.months, points)
    }

    fn percent_change(&self, series: &MoneyAmountSeries) -> Result<IndexSeries> {
        let points = self.scan(series, self.months + 1, |window| {
            let (oldest, newest) = oldest_and_newest(window);
            Ok(ctx::div(ctx::sub(newest, oldest), oldest).unwrap_or(Decimal::ZERO))
        })?;
        IndexSeries::from_points(
            format!("{} pct change({})", series.name(), self.months),
            points,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::series::InterpolationStrategy;
    use rust_decimal_macros::dec;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn series(values: &[Decimal]) -> MoneyAmountSeries {
        MoneyAmountSeries::from_points(
            "expenses",
            Currency::EUR,
            values
                .iter()
                .enumerate()
                .map(|(i, v)| (ym(2023, 11).plus_months(i as i64), *v)),
            InterpolationStrategy::NoInterpolation,
        )
        .unwrap()
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let s = series(&[dec!(4), dec!(0), dec!(9.25)]);
        let avg = SimpleAggregation::new(1).unwrap().average(&s).unwrap();
        assert_eq!(avg.items().collect::<Vec<_>>(), s.items().collect::<Vec<_>>());
    }

    #[test]
    fn test_leading_windows_are_under_filled() {
        let s = series(&[dec!(2), dec!(4), dec!(6), dec!(8)]);
        let avg = SimpleAggregation::new(3).unwrap().average(&s).unwrap();
        assert_eq!(avg.len(), 4);
        assert_eq!(avg.get_amount(ym(2023, 11)).unwrap().amount(), dec!(2));
        assert_eq!(avg.get_amount(ym(2023, 12)).unwrap().amount(), dec!(3));
        assert_eq!(avg.get_amount(ym(2024, 1)).unwrap().amount(), dec!(4));
        assert_eq!(avg.get_amount(ym(2024, 2)).unwrap().amount(), dec!(6));
    }

    #[test]
    fn test_sum_keeps_currency() {
        let s = series(&[dec!(1), dec!(2), dec!(3)]);
        let sum = SimpleAggregation::new(2).unwrap().sum(&s).unwrap();
        assert_eq!(sum.currency(), Currency::EUR);
        assert_eq!(sum.get_amount(ym(2024, 1)).unwrap().amount(), dec!(5));
    }

    #[test]
    fn test_change_and_percent_change() {
        let s = series(&[dec!(0), dec!(50), dec!(100)]);
        let aggregation = SimpleAggregation::new(1).unwrap();

        let change = aggregation.change(&s).unwrap();
        assert_eq!(change.get_amount(ym(2023, 11)).unwrap().amount(), dec!(0));
        assert_eq!(change.get_amount(ym(2024, 1)).unwrap().amount(), dec!(50));

        let pct = aggregation.percent_change(&s).unwrap();
        // Previous value zero: defined as no change.
        assert_eq!(pct.get_index(ym(2023, 12)).unwrap(), Decimal::ZERO);
        assert_eq!(pct.get_index(ym(2024, 1)).unwrap(), dec!(1));
    }

    #[test]
    fn test_change_compares_with_the_value_a_window_earlier() {
        let values: Vec<Decimal> = (1..=21).map(Decimal::from).collect();
        let change = SimpleAggregation::new(12).unwrap().change(&series(&values)).unwrap();

        // Under-filled: month 6 (value 6) against the first value.
        assert_eq!(change.get_amount(ym(2024, 4)).unwrap().amount(), dec!(5));
        // Full window of 13 values: always twelve months apart.
        let last = ym(2023, 11).plus_months(20);
        assert_eq!(change.get_amount(last).unwrap().amount(), dec!(12));
        assert_eq!(change.get_amount(last.prev()).unwrap().amount(), dec!(12));
    }
}
