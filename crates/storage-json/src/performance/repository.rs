use log::debug;
use moneycalc_core::portfolio::performance::{SeenPrice, SeenPricesRepositoryTrait};
use moneycalc_core::{Currency, Result};
use std::collections::BTreeMap;

use super::model::SeenPriceDB;
use crate::errors::StorageError;
use crate::store::JsonStore;

/// Reads `{"CSPX": [{"dmy": "dd-mm-yyyy", "price": ...}], ...}`.
///
/// The file is optional: without it no prices have been recorded.
pub struct SeenPricesRepository {
    store: JsonStore,
    file: String,
}

impl SeenPricesRepository {
    pub fn new(store: JsonStore, file: impl Into<String>) -> Self {
        SeenPricesRepository {
            store,
            file: file.into(),
        }
    }
}

impl SeenPricesRepositoryTrait for SeenPricesRepository {
    fn load_seen_prices(&self, benchmark: Currency) -> Result<Vec<SeenPrice>> {
        let mut all: BTreeMap<Currency, Vec<SeenPriceDB>> = match self.store.read(&self.file) {
            Ok(all) => all,
            Err(StorageError::NotFound(path)) => {
                debug!("No seen prices at {}", path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        all.remove(&benchmark)
            .unwrap_or_default()
            .into_iter()
            .map(SeenPrice::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneycalc_core::Error;
    use rust_decimal_macros::dec;
    use std::fs;

    fn repository(dir: &tempfile::TempDir) -> SeenPricesRepository {
        SeenPricesRepository::new(JsonStore::new(dir.path()), "index/seen-prices.json")
    }

    fn write(dir: &tempfile::TempDir, content: &str) {
        fs::create_dir_all(dir.path().join("index")).unwrap();
        fs::write(dir.path().join("index/seen-prices.json"), content).unwrap();
    }

    #[test]
    fn test_loads_prices_for_one_benchmark() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir,
            r#"{"CSPX": [{"dmy": "15-03-2024", "price": 512.5}], "EIMI": [{"dmy": "01-02-2024", "price": 30}]}"#,
        );

        let prices = repository(&dir).load_seen_prices(Currency::CSPX).unwrap();
        assert_eq!(
            prices,
            vec![SeenPrice {
                date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                price: dec!(512.5),
            }]
        );
        assert!(repository(&dir).load_seen_prices(Currency::RTWO).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_means_no_prices() {
        let dir = tempfile::tempdir().unwrap();
        assert!(repository(&dir).load_seen_prices(Currency::CSPX).unwrap().is_empty());
    }

    #[test]
    fn test_bad_date_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, r#"{"CSPX": [{"dmy": "2024-03-15", "price": 512.5}]}"#);
        let err = repository(&dir).load_seen_prices(Currency::CSPX).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_dates_are_written_day_first() {
        let db = SeenPriceDB::from(SeenPrice {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            price: dec!(1),
        });
        assert_eq!(db.dmy, "05-01-2024");
    }
}
