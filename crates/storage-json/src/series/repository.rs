use moneycalc_core::errors::Error;
use moneycalc_core::series::{IndexSeries, MoneyAmountSeries, SeriesRepositoryTrait};
use moneycalc_core::Result;

use super::model::SeriesFileDB;
use crate::errors::series_error;
use crate::store::JsonStore;

pub struct SeriesRepository {
    store: JsonStore,
}

impl SeriesRepository {
    pub fn new(store: JsonStore) -> Self {
        SeriesRepository { store }
    }

    fn read_file(&self, name: &str) -> Result<SeriesFileDB> {
        self.store
            .read::<SeriesFileDB>(name)
            .map_err(|e| series_error(name, e))
    }
}

impl SeriesRepositoryTrait for SeriesRepository {
    fn read_money_series(&self, name: &str) -> Result<MoneyAmountSeries> {
        let file = self.read_file(name)?;
        let currency = file.currency.ok_or_else(|| {
            Error::invalid_input(format!("series '{}' does not declare a currency", name))
        })?;
        file.into_money_series(name, currency)
    }

    fn read_index_series(&self, name: &str) -> Result<IndexSeries> {
        self.read_file(name)?.into_index_series(name)
    }
}
