use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::decimal_context as ctx;
use super::Currency;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{CalculatorError, Error, Result};

/// An immutable amount of money in one currency.
///
/// Arithmetic between amounts requires both sides to share a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyAmount {
    amount: Decimal,
    currency: Currency,
}

impl MoneyAmount {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: ctx::round(amount),
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn assert_currency(&self, currency: Currency) -> Result<()> {
        if self.currency != currency {
            return Err(Error::CurrencyMismatch {
                expected: currency,
                found: self.currency,
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &MoneyAmount) -> Result<MoneyAmount> {
        other.assert_currency(self.currency)?;
        Ok(Self {
            amount: ctx::add(self.amount, other.amount),
            currency: self.currency,
        })
    }

    pub fn subtract(&self, other: &MoneyAmount) -> Result<MoneyAmount> {
        other.assert_currency(self.currency)?;
        Ok(Self {
            amount: ctx::sub(self.amount, other.amount),
            currency: self.currency,
        })
    }

    pub fn max(&self, other: &MoneyAmount) -> Result<MoneyAmount> {
        other.assert_currency(self.currency)?;
        Ok(if self.amount >= other.amount {
            *self
        } else {
            *other
        })
    }

    pub fn min(&self, other: &MoneyAmount) -> Result<MoneyAmount> {
        other.assert_currency(self.currency)?;
        Ok(if self.amount <= other.amount {
            *self
        } else {
            *other
        })
    }

    /// Multiplies by `factor`.
    pub fn scale(&self, factor: Decimal) -> MoneyAmount {
        Self {
            amount: ctx::mul(self.amount, factor),
            currency: self.currency,
        }
    }

    /// Rescales by `factor / divisor`.
    ///
    /// A zero amount or equal divisor and factor return `self` untouched.
    pub fn adjust(&self, divisor: Decimal, factor: Decimal) -> Result<MoneyAmount> {
        if self.amount.is_zero() || divisor == factor {
            return Ok(*self);
        }
        let ratio = ctx::div(factor, divisor).ok_or_else(|| {
            CalculatorError::Calculation(format!("cannot adjust {} by a zero divisor", self))
        })?;
        Ok(self.scale(ratio))
    }

    /// Re-denominates in `target` at `rate` units of `target` per unit of `self`.
    pub fn exchange(&self, rate: Decimal, target: Currency) -> MoneyAmount {
        if self.currency == target && rate == Decimal::ONE {
            return *self;
        }
        Self {
            amount: ctx::mul(self.amount, rate),
            currency: target,
        }
    }

    /// Adds up amounts of `currency`; an empty iterator sums to zero.
    pub fn sum<'a, I>(currency: Currency, amounts: I) -> Result<MoneyAmount>
    where
        I: IntoIterator<Item = &'a MoneyAmount>,
    {
        amounts
            .into_iter()
            .try_fold(MoneyAmount::zero(currency), |acc, m| acc.add(m))
    }
}

impl fmt::Display for MoneyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.currency,
            self.amount.round_dp(DISPLAY_DECIMAL_PRECISION)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> MoneyAmount {
        MoneyAmount::new(amount, Currency::USD)
    }

    #[test]
    fn test_add_then_subtract_is_identity() {
        let a = usd(dec!(1234.5678901234));
        let b = usd(dec!(0.0000000001));
        assert_eq!(a.add(&b).unwrap().subtract(&b).unwrap(), a);
    }

    #[test]
    fn test_mismatched_currency_fails() {
        let a = usd(dec!(10));
        let b = MoneyAmount::new(dec!(10), Currency::EUR);
        assert!(matches!(
            a.add(&b),
            Err(Error::CurrencyMismatch {
                expected: Currency::USD,
                found: Currency::EUR
            })
        ));
        assert!(a.subtract(&b).is_err());
        assert!(a.max(&b).is_err());
        assert!(a.min(&b).is_err());
    }

    #[test]
    fn test_adjust_identity_cases() {
        let zero = MoneyAmount::zero(Currency::EUR);
        assert_eq!(zero.adjust(Decimal::ZERO, dec!(3)).unwrap(), zero);

        let a = usd(dec!(100));
        assert_eq!(a.adjust(dec!(7), dec!(7)).unwrap(), a);
    }

    #[test]
    fn test_adjust_rescales_by_ratio() {
        let a = usd(dec!(100));
        assert_eq!(a.adjust(dec!(4), dec!(5)).unwrap().amount(), dec!(125));
    }

    #[test]
    fn test_adjust_by_zero_divisor_fails() {
        let a = usd(dec!(100));
        assert!(a.adjust(Decimal::ZERO, dec!(5)).is_err());
    }

    #[test]
    fn test_min_max() {
        let a = usd(dec!(1));
        let b = usd(dec!(2));
        assert_eq!(a.max(&b).unwrap(), b);
        assert_eq!(a.min(&b).unwrap(), a);
    }

    #[test]
    fn test_exchange_changes_currency() {
        let eur = MoneyAmount::new(dec!(10), Currency::EUR);
        let converted = eur.exchange(dec!(1.1), Currency::USD);
        assert_eq!(converted, usd(dec!(11)));
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total = MoneyAmount::sum(Currency::USD, []).unwrap();
        assert!(total.is_zero());
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(usd(dec!(12.345)).to_string(), "USD 12.34");
    }
}
