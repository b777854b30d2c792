use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

/// A calendar month, the time axis of every series.
///
/// Ordering is chronological (year first, then month). Serialized as `YYYY-MM`,
/// so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_input(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(Error::invalid_input(format!(
                "year must be between 1 and 9999, got {}",
                year
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn plus_months(&self, months: i64) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + months;
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(&self) -> Self {
        self.plus_months(1)
    }

    pub fn prev(&self) -> Self {
        self.plus_months(-1)
    }

    /// Months from `self` to `other`, zero unless `other` is later.
    pub fn months_until(&self, other: &YearMonth) -> i64 {
        let from = i64::from(self.year) * 12 + i64::from(self.month);
        let to = i64::from(other.year) * 12 + i64::from(other.month);
        (to - from).max(0)
    }

    /// Fails when the month lies outside the calendar range of `NaiveDate`.
    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| Error::invalid_input(format!("{} has no calendar date", self)))
    }

    pub fn last_day(&self) -> Result<NaiveDate> {
        self.next()
            .first_day()?
            .pred_opt()
            .ok_or_else(|| Error::invalid_input(format!("{} has no last day", self)))
    }

    pub fn min(self, other: YearMonth) -> YearMonth {
        std::cmp::min(self, other)
    }

    pub fn max(self, other: YearMonth) -> YearMonth {
        std::cmp::max(self, other)
    }

    /// Iterates from `self` through `to`, both inclusive.
    pub fn through(self, to: YearMonth) -> impl Iterator<Item = YearMonth> {
        let mut current = Some(self).filter(|ym| *ym <= to);
        std::iter::from_fn(move || {
            let ym = current?;
            current = Some(ym.next()).filter(|next| *next <= to);
            Some(ym)
        })
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth::from_date(date)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::invalid_input(format!("expected YYYY-MM, got '{}'", s)))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| Error::invalid_input(format!("invalid year in '{}'", s)))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| Error::invalid_input(format!("invalid month in '{}'", s)))?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}
