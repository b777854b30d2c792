use moneycalc_core::projections::{ExpectedReturnGroup, ExpectedReturnsRepositoryTrait};
use moneycalc_core::Result;
use std::collections::BTreeMap;

use crate::store::JsonStore;

/// Reads `{"<group>": {"mu": 7.0, "sigma": 15.0}, ...}`, both in percent.
pub struct ExpectedReturnsRepository {
    store: JsonStore,
    file: String,
}

impl ExpectedReturnsRepository {
    pub fn new(store: JsonStore, file: impl Into<String>) -> Self {
        ExpectedReturnsRepository {
            store,
            file: file.into(),
        }
    }
}

impl ExpectedReturnsRepositoryTrait for ExpectedReturnsRepository {
    fn load_expected_returns(&self) -> Result<BTreeMap<String, ExpectedReturnGroup>> {
        Ok(self.store.read(&self.file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_groups_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("index")).unwrap();
        fs::write(
            dir.path().join("index/expected-returns.json"),
            r#"{"stocks": {"mu": 7, "sigma": 15.5}, "bonds": {"mu": 2.5, "sigma": 4}}"#,
        )
        .unwrap();
        let repository =
            ExpectedReturnsRepository::new(JsonStore::new(dir.path()), "index/expected-returns.json");

        let groups = repository.load_expected_returns().unwrap();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["bonds", "stocks"]);
        assert_eq!(groups["stocks"], ExpectedReturnGroup { mu: 7.0, sigma: 15.5 });
    }
}
