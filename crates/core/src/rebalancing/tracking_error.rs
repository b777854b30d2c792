use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::money::decimal_context as ctx;
use crate::money::Currency;

/// Sum over the target currencies of `(weight - value / total)^2`.
///
/// Currencies without a value count as zero; an empty portfolio has no error.
pub fn tracking_error(
    weights: &BTreeMap<Currency, Decimal>,
    values: &BTreeMap<Currency, Decimal>,
) -> Decimal {
    let total = values
        .values()
        .fold(Decimal::ZERO, |acc, value| ctx::add(acc, *value));
    if total.is_zero() {
        return Decimal::ZERO;
    }
    weights.iter().fold(Decimal::ZERO, |acc, (currency, weight)| {
        let value = values.get(currency).copied().unwrap_or(Decimal::ZERO);
        let share = ctx::div(value, total).unwrap_or(Decimal::ZERO);
        let error = ctx::sub(*weight, share);
        ctx::add(acc, ctx::mul(error, error))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_on_target_is_zero() {
        let weights = BTreeMap::from([(Currency::CSPX, dec!(0.5)), (Currency::EIMI, dec!(0.5))]);
        let values = BTreeMap::from([(Currency::CSPX, dec!(40)), (Currency::EIMI, dec!(40))]);
        assert_eq!(tracking_error(&weights, &values), Decimal::ZERO);
    }

    #[test]
    fn test_missing_value_counts_as_zero() {
        let weights = BTreeMap::from([(Currency::CSPX, dec!(0.5)), (Currency::EIMI, dec!(0.5))]);
        let values = BTreeMap::from([(Currency::CSPX, dec!(100))]);
        // (0.5 - 1)^2 + (0.5 - 0)^2
        assert_eq!(tracking_error(&weights, &values), dec!(0.5));
    }

    #[test]
    fn test_empty_portfolio_is_zero() {
        let weights = BTreeMap::from([(Currency::CSPX, dec!(1))]);
        assert_eq!(tracking_error(&weights, &BTreeMap::new()), Decimal::ZERO);
    }
}
