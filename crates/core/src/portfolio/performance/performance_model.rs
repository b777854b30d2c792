use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Currency;

/// Money-weighted return over a window and its annualized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedDietzReturnResult {
    pub money_weighted: Decimal,
    pub annualized_money_weighted: Decimal,
}

impl ModifiedDietzReturnResult {
    pub const ZERO: ModifiedDietzReturnResult = ModifiedDietzReturnResult {
        money_weighted: Decimal::ZERO,
        annualized_money_weighted: Decimal::ZERO,
    };
}

/// Direction of a cash flow relative to the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowDirection {
    /// Money entering the portfolio (a purchase).
    Inflow,
    /// Money leaving the portfolio (a sale).
    Outflow,
}

/// One cash flow inside a valuation window, already in the report currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub date: NaiveDate,
    pub direction: FlowDirection,
    /// Signed: positive for inflows, negative for outflows.
    pub amount: Decimal,
    /// `amount` weighted by the share of the window remaining after the flow.
    pub weighted_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReturn {
    pub year: i32,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub money_weighted: Decimal,
    pub annualized_money_weighted: Decimal,
}

/// Per calendar year returns plus the whole-history return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReturnsReport {
    pub currency: Currency,
    pub nominal: bool,
    pub years: Vec<YearlyReturn>,
    pub total: ModifiedDietzReturnResult,
}

/// A USD price of a benchmark ticker observed on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenPrice {
    pub date: NaiveDate,
    pub price: Decimal,
}
