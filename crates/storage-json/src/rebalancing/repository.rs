use moneycalc_core::rebalancing::{RebalancingConfig, RebalancingConfigRepositoryTrait};
use moneycalc_core::Result;

use super::model::RebalancingConfigDB;
use crate::store::JsonStore;

pub struct RebalancingConfigRepository {
    store: JsonStore,
    file: String,
}

impl RebalancingConfigRepository {
    pub fn new(store: JsonStore, file: impl Into<String>) -> Self {
        RebalancingConfigRepository {
            store,
            file: file.into(),
        }
    }
}

impl RebalancingConfigRepositoryTrait for RebalancingConfigRepository {
    fn load_rebalancing_config(&self) -> Result<RebalancingConfig> {
        let db: RebalancingConfigDB = self.store.read(&self.file)?;
        RebalancingConfig::try_from(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneycalc_core::errors::{Error, ValidationError};
    use moneycalc_core::Currency;
    use rust_decimal_macros::dec;
    use std::fs;

    fn load(content: &str) -> Result<RebalancingConfig> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rebalancing.json"), content).unwrap();
        RebalancingConfigRepository::new(JsonStore::new(dir.path()), "rebalancing.json")
            .load_rebalancing_config()
    }

    #[test]
    fn test_loads_and_validates_config() {
        let config = load(
            r#"{
                "weights": {"CSPX": 0.7, "EIMI": 0.3},
                "equivalences": {"CSPX": ["CSPX", "SXR8"], "EIMI": ["EIMI", "EMIM"]},
                "capitalGainsTaxRate": 0.15,
                "maxContribution": 9970
            }"#,
        )
        .unwrap();
        assert_eq!(config.weights()[&Currency::CSPX], dec!(0.7));
        assert_eq!(config.canonical(Currency::EMIM), Some(Currency::EIMI));
        assert_eq!(config.max_contribution(), Some(dec!(9970)));
        assert_eq!(config.lot_comment(), "lse");
    }

    #[test]
    fn test_overlapping_groups_are_rejected_on_load() {
        let err = load(
            r#"{
                "weights": {"CSPX": 0.5, "EIMI": 0.5},
                "equivalences": {"CSPX": ["CSPX", "SXR8"], "EIMI": ["EIMI", "SXR8"]},
                "capitalGainsTaxRate": 0.15
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_ticker_fails_to_parse() {
        let err = load(
            r#"{"weights": {"DOGE": 1}, "equivalences": {"DOGE": ["DOGE"]}, "capitalGainsTaxRate": 0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
