use rust_decimal::Decimal;

use super::aggregation_traits::Aggregation;
use crate::errors::{Error, Result};
use crate::money::decimal_context as ctx;
use crate::money::MoneyAmount;
use crate::series::{IndexSeries, MoneyAmountSeries, YearMonth};

/// Full trailing windows of `months` values.
///
/// Months without a complete window are skipped. When a horizon is set the
/// series is padded with zeros after its last month up to the horizon, so
/// windows keep sliding past the end of the recorded data.
#[derive(Debug, Clone, Copy)]
pub struct SlidingWindow {
    months: usize,
    horizon: Option<YearMonth>,
}

impl SlidingWindow {
    pub fn new(months: usize) -> Result<Self> {
        if months == 0 {
            return Err(Error::invalid_input("window must span at least one month"));
        }
        Ok(Self {
            months,
            horizon: None,
        })
    }

    pub fn padded_until(self, horizon: YearMonth) -> Self {
        Self {
            horizon: Some(horizon),
            ..self
        }
    }

    fn padded(&self, series: &MoneyAmountSeries) -> Vec<(YearMonth, Decimal)> {
        let (from, to) = match (series.from(), series.to()) {
            (Some(from), Some(to)) => (from, to),
            _ => return Vec::new(),
        };
        let end = self.horizon.map_or(to, |horizon| to.max(horizon));
        from.through(end)
            .map(|ym| (ym, series.get_amount_or_else_zero(ym).amount()))
            .collect()
    }

    fn aggregate<F>(
        &self,
        series: &MoneyAmountSeries,
        label: &str,
        window_len: usize,
        operation: F,
    ) -> Result<MoneyAmountSeries>
    where
        F: Fn(&[(YearMonth, Decimal)]) -> Result<Decimal>,
    {
        let mut result = MoneyAmountSeries::new(
            format!("{} {}({})", series.name(), label, self.months),
            series.currency(),
        );
        for window in self.padded(series).windows(window_len) {
            let (last, _) = window[window.len() - 1];
            let value = operation(window)?;
            result.put_amount(last, MoneyAmount::new(value, series.currency()))?;
        }
        Ok(result)
    }
}

fn window_sum(window: &[(YearMonth, Decimal)]) -> Decimal {
    window
        .iter()
        .fold(Decimal::ZERO, |acc, (_, value)| ctx::add(acc, *value))
}

impl Aggregation for SlidingWindow {
    fn average(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        self.aggregate(series, "avg", self.months, |window| {
            ctx::div(window_sum(window), Decimal::from(window.len()))
                .ok_or_else(|| Error::invalid_input("empty window"))
        })
    }

    fn sum(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        self.aggregate(series, "sum", self.months, |window| Ok(window_sum(window)))
    }

    fn change(&self, series: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        self.aggregate(series, "change", self.months + 1, |window| {
            let (_, first) = window[0];
            let (_, last) = window[window.len() - 1];
            Ok(ctx::sub(last, first))
        })
    }

    fn percent_change(&self, series: &MoneyAmountSeries) -> Result<IndexSeries> {
        let points = self
            .padded(series)
            .windows(self.months + 1)
            .map(|window| {
                let (_, first) = window[0];
                let (last_ym, last) = window[window.len() - 1];
                let change = ctx::div(ctx::sub(last, first), first).unwrap_or(Decimal::ZERO);
                (last_ym, change)
            })
            .collect::<Vec<_>>();
        IndexSeries::from_points(
            format!("{} pct change({})", series.name(), self.months),
            points,
        )
    }
}
