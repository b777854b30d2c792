//! Rebalancing domain models.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::constants::{DEFAULT_LOT_COMMENT, WEIGHT_SUM_TOLERANCE};
use crate::errors::{Error, Result};
use crate::investments::{Investment, InvestmentEvent};
use crate::money::Currency;

/// Target allocation of the ETF portfolio.
///
/// `equivalences` maps a canonical ticker to every listing that counts as the
/// same holding (for example `CSPX -> [CSPX, SXR8]`); `weights` holds the
/// target fraction of each canonical ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingConfig {
    weights: BTreeMap<Currency, Decimal>,
    equivalences: BTreeMap<Currency, Vec<Currency>>,
    capital_gains_tax_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_contribution: Option<Decimal>,
    lot_comment: String,
}

impl RebalancingConfig {
    pub fn new(
        weights: BTreeMap<Currency, Decimal>,
        equivalences: BTreeMap<Currency, Vec<Currency>>,
        capital_gains_tax_rate: Decimal,
    ) -> Result<Self> {
        if let Some((currency, weight)) = weights.iter().find(|(_, w)| w.is_sign_negative()) {
            return Err(Error::invalid_input(format!(
                "weight of {} is negative: {}",
                currency, weight
            )));
        }

        let weight_keys: BTreeSet<_> = weights.keys().collect();
        let group_keys: BTreeSet<_> = equivalences.keys().collect();
        if weight_keys != group_keys {
            return Err(Error::invalid_input(format!(
                "weights {:?} and equivalence groups {:?} must name the same currencies",
                weight_keys, group_keys
            )));
        }

        let mut seen: BTreeMap<Currency, Currency> = BTreeMap::new();
        for (canonical, members) in &equivalences {
            if !members.contains(canonical) {
                return Err(Error::invalid_input(format!(
                    "{} is not a member of its own equivalence group",
                    canonical
                )));
            }
            for member in members {
                if let Some(other) = seen.insert(*member, *canonical) {
                    if other != *canonical {
                        return Err(Error::invalid_input(format!(
                            "{} belongs to both the {} and {} groups",
                            member, other, canonical
                        )));
                    }
                }
            }
        }

        if capital_gains_tax_rate.is_sign_negative() || capital_gains_tax_rate > Decimal::ONE {
            return Err(Error::invalid_input(format!(
                "capital gains tax rate must be between 0 and 1, got {}",
                capital_gains_tax_rate
            )));
        }

        let total: Decimal = weights.values().sum();
        if (total - Decimal::ONE).abs() > WEIGHT_SUM_TOLERANCE {
            warn!("Rebalancing weights add up to {}, not 1", total);
        }

        Ok(Self {
            weights,
            equivalences,
            capital_gains_tax_rate,
            max_contribution: None,
            lot_comment: DEFAULT_LOT_COMMENT.to_string(),
        })
    }

    pub fn with_max_contribution(mut self, max: Option<Decimal>) -> Result<Self> {
        if let Some(value) = max {
            if value.is_sign_negative() {
                return Err(Error::invalid_input(format!(
                    "max contribution must not be negative, got {}",
                    value
                )));
            }
        }
        self.max_contribution = max;
        Ok(self)
    }

    pub fn with_lot_comment(mut self, comment: Option<String>) -> Self {
        if let Some(comment) = comment {
            self.lot_comment = comment;
        }
        self
    }

    pub fn weights(&self) -> &BTreeMap<Currency, Decimal> {
        &self.weights
    }

    pub fn equivalences(&self) -> &BTreeMap<Currency, Vec<Currency>> {
        &self.equivalences
    }

    pub fn capital_gains_tax_rate(&self) -> Decimal {
        self.capital_gains_tax_rate
    }

    pub fn max_contribution(&self) -> Option<Decimal> {
        self.max_contribution
    }

    pub fn lot_comment(&self) -> &str {
        &self.lot_comment
    }

    /// The canonical ticker whose group contains `currency`.
    pub fn canonical(&self, currency: Currency) -> Option<Currency> {
        self.equivalences
            .iter()
            .find(|(_, members)| members.contains(&currency))
            .map(|(canonical, _)| *canonical)
    }
}

/// Inputs of a buy-side run, all amounts in `currency`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyRequest {
    pub currency: Currency,
    /// Current value of each canonical ticker.
    pub values: BTreeMap<Currency, Decimal>,
    /// Price of one unit of each canonical ticker.
    pub prices: BTreeMap<Currency, Decimal>,
    pub contribution: Decimal,
    pub transfer_fee: Decimal,
    pub as_of: NaiveDate,
    pub lot_comment: String,
}

/// One share added by the greedy top-up and the tracking error around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreedyStep {
    pub currency: Currency,
    pub before: Decimal,
    pub after: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyResult {
    pub currency: Currency,
    pub initial_values: BTreeMap<Currency, Decimal>,
    pub contribution: Decimal,
    pub final_values: BTreeMap<Currency, Decimal>,
    /// Whole shares to buy; only currencies with at least one share.
    pub shares: BTreeMap<Currency, Decimal>,
    pub remainder: Decimal,
    pub fee_attribution: BTreeMap<Currency, Decimal>,
    pub steps: Vec<GreedyStep>,
    /// Ledger entries recording the purchases.
    pub lots: Vec<Investment>,
}

/// A held lot as the sell side sees it, valued in the pricing currency.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenLot {
    pub investment: Investment,
    pub value: Decimal,
    pub cost_basis: Decimal,
    /// The event recorded if this lot is sold today.
    pub exit: InvestmentEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SellRequest {
    pub withdrawal: Decimal,
    pub allow_oversell: bool,
    pub capital_gains_tax_rate: Decimal,
    /// Open lots per ticker, oldest first.
    pub lots: BTreeMap<Currency, VecDeque<OpenLot>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldLot {
    pub currency: Currency,
    pub initial_date: NaiveDate,
    pub quantity: Decimal,
    pub value: Decimal,
    pub cost_basis: Decimal,
    pub tracking_error: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellResult {
    pub withdrawal: Decimal,
    pub initial_values: BTreeMap<Currency, Decimal>,
    pub final_values: BTreeMap<Currency, Decimal>,
    pub sold_lots: Vec<SoldLot>,
    /// Cumulative sold value after each sale.
    pub progress: Vec<Decimal>,
    pub sold: Decimal,
    pub capital_gains_tax: Decimal,
    pub net: Decimal,
    pub out_events: Vec<InvestmentEvent>,
}
