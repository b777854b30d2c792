use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::YearMonth;
use crate::errors::{Error, Result};

/// A monthly series of dimensionless factors: price indexes, exchange rates,
/// percentage changes.
///
/// Lookups are strict. A month outside the recorded data is an error, the
/// series never clamps to its last value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSeries {
    name: String,
    values: BTreeMap<YearMonth, Decimal>,
    /// When set, every month answers with this factor.
    constant: Option<Decimal>,
}

impl IndexSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            constant: None,
        }
    }

    pub fn from_points<I>(name: impl Into<String>, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (YearMonth, Decimal)>,
    {
        let mut series = Self::new(name);
        for (ym, value) in points {
            if series.values.insert(ym, value).is_some() {
                return Err(Error::invalid_input(format!(
                    "index '{}' has month {} more than once",
                    series.name, ym
                )));
            }
        }
        Ok(series)
    }

    /// A series with the same factor for every month.
    pub fn constant(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            constant: Some(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    pub fn put_index(&mut self, ym: YearMonth, value: Decimal) {
        self.values.insert(ym, value);
    }

    pub fn get_index(&self, ym: YearMonth) -> Result<Decimal> {
        if let Some(value) = self.constant {
            return Ok(value);
        }
        self.values
            .get(&ym)
            .copied()
            .ok_or_else(|| Error::no_data(&self.name, ym))
    }

    pub fn has(&self, ym: YearMonth) -> bool {
        self.constant.is_some() || self.values.contains_key(&ym)
    }

    /// First recorded month; `None` for constant or empty series.
    pub fn from(&self) -> Option<YearMonth> {
        self.values.keys().next().copied()
    }

    /// Last recorded month; `None` for constant or empty series.
    pub fn to(&self) -> Option<YearMonth> {
        self.values.keys().next_back().copied()
    }

    pub fn items(&self) -> impl Iterator<Item = (YearMonth, Decimal)> + '_ {
        self.values.iter().map(|(ym, value)| (*ym, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.constant.is_none()
    }

    /// Every factor, the constant one included.
    pub fn factors(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.constant.into_iter().chain(self.values.values().copied())
    }

    /// Same months, each factor replaced by `f(factor)`.
    pub fn map<F>(&self, name: impl Into<String>, mut f: F) -> IndexSeries
    where
        F: FnMut(Decimal) -> Decimal,
    {
        Self {
            name: name.into(),
            values: self.items().map(|(ym, value)| (ym, f(value))).collect(),
            constant: self.constant.map(&mut f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_lookup_is_strict() {
        let series =
            IndexSeries::from_points("cpi", vec![(ym(2024, 1), dec!(300)), (ym(2024, 2), dec!(301))])
                .unwrap();
        assert_eq!(series.get_index(ym(2024, 2)).unwrap(), dec!(301));
        // No extrapolation past the latest month.
        assert!(matches!(
            series.get_index(ym(2024, 3)),
            Err(Error::NoSeriesDataFound { .. })
        ));
        assert!(series.get_index(ym(2023, 12)).is_err());
    }

    #[test]
    fn test_constant_answers_every_month() {
        let series = IndexSeries::constant("peg", dec!(1));
        assert_eq!(series.get_index(ym(1990, 1)).unwrap(), dec!(1));
        assert_eq!(series.get_index(ym(2090, 12)).unwrap(), dec!(1));
        assert_eq!(series.from(), None);
    }

    #[test]
    fn test_map_keeps_months_and_constant() {
        let series =
            IndexSeries::from_points("fx", vec![(ym(2024, 1), dec!(2)), (ym(2024, 2), dec!(4))])
                .unwrap();
        let halved = series.map("half", |value| value / dec!(2));
        assert_eq!(halved.get_index(ym(2024, 2)).unwrap(), dec!(2));
        assert_eq!(halved.name(), "half");

        let peg = IndexSeries::constant("peg", dec!(3)).map("peg", |value| value + dec!(1));
        assert_eq!(peg.factors().collect::<Vec<_>>(), vec![dec!(4)]);
    }

    #[test]
    fn test_duplicate_month_is_rejected() {
        let result =
            IndexSeries::from_points("cpi", vec![(ym(2024, 1), dec!(1)), (ym(2024, 1), dec!(2))]);
        assert!(result.is_err());
    }
}
