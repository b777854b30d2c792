//! Money primitives: currencies, amounts and the decimal context.

mod currency;
pub mod decimal_context;
mod money_amount;

pub use currency::Currency;
pub use money_amount::MoneyAmount;
