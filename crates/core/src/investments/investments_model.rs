//! Investment ledger domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Currency, MoneyAmount};

/// Kind of instrument a lot was invested in.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    /// Exchange-traded fund.
    ETF,
    /// Bond.
    BONO,
    /// Fixed-term deposit.
    PF,
    /// Mutual fund.
    FCI,
    /// Cash held in dollars.
    USD,
    CRYPTO,
}

/// A dated movement of money into or out of an investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentEvent {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: Currency,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub transfer_fee: Decimal,
    /// USD per unit of `currency`, locked when the event happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx: Option<Decimal>,
}

impl InvestmentEvent {
    pub fn money_amount(&self) -> MoneyAmount {
        MoneyAmount::new(self.amount, self.currency)
    }
}

/// What a lot holds: a quantity of some currency or ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAsset {
    pub currency: Currency,
    pub amount: Decimal,
}

impl InvestmentAsset {
    pub fn money_amount(&self) -> MoneyAmount {
        MoneyAmount::new(self.amount, self.currency)
    }
}

/// One lot of the ledger: an entry event, an optional exit event and the asset held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    #[serde(rename = "in")]
    pub entry: InvestmentEvent,
    #[serde(rename = "out", default, skip_serializing_if = "Option::is_none")]
    pub exit: Option<InvestmentEvent>,
    #[serde(rename = "investment")]
    pub asset: InvestmentAsset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Investment {
    /// Held on `date`: bought on or before it and not yet sold.
    pub fn is_current(&self, date: NaiveDate) -> bool {
        self.entry.date <= date && self.exit.as_ref().map_or(true, |out| out.date > date)
    }

    pub fn is_etf(&self) -> bool {
        self.investment_type == InvestmentType::ETF
    }

    pub fn initial_date(&self) -> NaiveDate {
        self.entry.date
    }

    pub fn initial_currency(&self) -> Currency {
        self.entry.currency
    }

    pub fn initial_money_amount(&self) -> MoneyAmount {
        self.entry.money_amount()
    }

    /// Currency of the held asset.
    pub fn currency(&self) -> Currency {
        self.asset.currency
    }

    pub fn money_amount(&self) -> MoneyAmount {
        self.asset.money_amount()
    }

    /// A copy of this lot with `out` recorded as its sale.
    pub fn with_out(&self, out: InvestmentEvent) -> Investment {
        Investment {
            exit: Some(out),
            ..self.clone()
        }
    }
}
