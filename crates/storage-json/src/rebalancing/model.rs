//! File model for the rebalancing config.

use moneycalc_core::rebalancing::RebalancingConfig;
use moneycalc_core::{Currency, Error};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingConfigDB {
    pub weights: BTreeMap<Currency, Decimal>,
    pub equivalences: BTreeMap<Currency, Vec<Currency>>,
    pub capital_gains_tax_rate: Decimal,
    #[serde(default)]
    pub max_contribution: Option<Decimal>,
    #[serde(default)]
    pub lot_comment: Option<String>,
}

// Conversion to domain model; validation happens here
impl TryFrom<RebalancingConfigDB> for RebalancingConfig {
    type Error = Error;

    fn try_from(db: RebalancingConfigDB) -> Result<Self, Self::Error> {
        Ok(
            RebalancingConfig::new(db.weights, db.equivalences, db.capital_gains_tax_rate)?
                .with_max_contribution(db.max_contribution)?
                .with_lot_comment(db.lot_comment),
        )
    }
}
