use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{InterpolationStrategy, YearMonth};
use crate::errors::{Error, Result};
use crate::money::{Currency, MoneyAmount};

/// A monthly series of amounts, all in the same currency.
///
/// The covered range is `[from, to]`, inclusive, spanning the first and last
/// recorded months. An empty series has no range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmountSeries {
    name: String,
    currency: Currency,
    values: BTreeMap<YearMonth, MoneyAmount>,
}

impl MoneyAmountSeries {
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
            values: BTreeMap::new(),
        }
    }

    /// Builds a series from raw points, filling gaps between them with `strategy`.
    ///
    /// Points may come in any order; a month recorded twice is an error.
    pub fn from_points<I>(
        name: impl Into<String>,
        currency: Currency,
        points: I,
        strategy: InterpolationStrategy,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (YearMonth, Decimal)>,
    {
        let mut series = Self::new(name, currency);
        for (ym, amount) in points {
            if series.values.contains_key(&ym) {
                return Err(Error::invalid_input(format!(
                    "series '{}' has month {} more than once",
                    series.name, ym
                )));
            }
            series.values.insert(ym, MoneyAmount::new(amount, currency));
        }

        let recorded: Vec<(YearMonth, MoneyAmount)> =
            series.values.iter().map(|(k, v)| (*k, *v)).collect();
        for pair in recorded.windows(2) {
            let (previous_ym, previous_value) = pair[0];
            let (next_ym, _) = pair[1];
            let mut missing = previous_ym.next();
            while missing < next_ym {
                let filled = strategy.interpolate(&series.name, previous_value, missing)?;
                series.values.insert(missing, filled);
                missing = missing.next();
            }
        }
        Ok(series)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn from(&self) -> Option<YearMonth> {
        self.values.keys().next().copied()
    }

    pub fn to(&self) -> Option<YearMonth> {
        self.values.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Records `amount` for `ym`, widening the range when needed.
    pub fn put_amount(&mut self, ym: YearMonth, amount: MoneyAmount) -> Result<()> {
        amount.assert_currency(self.currency)?;
        self.values.insert(ym, amount);
        Ok(())
    }

    pub fn get_amount(&self, ym: YearMonth) -> Result<MoneyAmount> {
        self.values
            .get(&ym)
            .copied()
            .ok_or_else(|| Error::no_data(&self.name, ym))
    }

    pub fn get_amount_or_else_zero(&self, ym: YearMonth) -> MoneyAmount {
        self.values
            .get(&ym)
            .copied()
            .unwrap_or_else(|| MoneyAmount::zero(self.currency))
    }

    pub fn items(&self) -> impl Iterator<Item = (YearMonth, MoneyAmount)> + '_ {
        self.values.iter().map(|(ym, amount)| (*ym, *amount))
    }

    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(YearMonth, MoneyAmount),
    {
        for (ym, amount) in self.items() {
            f(ym, amount);
        }
    }

    /// Month-by-month sum. Months present on one side only count the other as zero.
    pub fn add(&self, other: &MoneyAmountSeries) -> Result<MoneyAmountSeries> {
        if other.currency != self.currency {
            return Err(Error::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }
        let mut result = Self::new(format!("{} + {}", self.name, other.name), self.currency);
        let range = match (self.from(), self.to(), other.from(), other.to()) {
            (Some(f1), Some(t1), Some(f2), Some(t2)) => Some((f1.min(f2), t1.max(t2))),
            (Some(f), Some(t), _, _) | (_, _, Some(f), Some(t)) => Some((f, t)),
            _ => None,
        };
        if let Some((from, to)) = range {
            for ym in from.through(to) {
                let sum = self
                    .get_amount_or_else_zero(ym)
                    .add(&other.get_amount_or_else_zero(ym))?;
                result.values.insert(ym, sum);
            }
        }
        Ok(result)
    }

    /// Applies `f` to every month, keeping the series currency.
    pub fn map<F>(&self, f: F) -> Result<MoneyAmountSeries>
    where
        F: FnMut(YearMonth, MoneyAmount) -> Result<MoneyAmount>,
    {
        self.map_to(self.currency, f)
    }

    /// Applies `f` to every month, producing a series in `currency`.
    pub fn map_to<F>(&self, currency: Currency, mut f: F) -> Result<MoneyAmountSeries>
    where
        F: FnMut(YearMonth, MoneyAmount) -> Result<MoneyAmount>,
    {
        let mut result = Self::new(self.name.clone(), currency);
        for (ym, amount) in self.items() {
            result.put_amount(ym, f(ym, amount)?)?;
        }
        Ok(result)
    }

    /// The months of this series within `[from, to]`.
    pub fn slice(&self, from: YearMonth, to: YearMonth) -> MoneyAmountSeries {
        let values = if from <= to {
            self.values
                .range(from..=to)
                .map(|(ym, amount)| (*ym, *amount))
                .collect()
        } else {
            BTreeMap::new()
        };
        Self {
            name: self.name.clone(),
            currency: self.currency,
            values,
        }
    }
}
