use log::debug;
use moneycalc_core::fx::{ExchangeRateSeries, FxRepositoryTrait};
use moneycalc_core::series::SeriesRepositoryTrait;
use moneycalc_core::Result;

use super::model::FxCatalogDB;
use crate::series::SeriesRepository;
use crate::store::JsonStore;

pub struct FxRepository {
    store: JsonStore,
    series: SeriesRepository,
    catalog: String,
}

impl FxRepository {
    pub fn new(store: JsonStore, catalog: impl Into<String>) -> Self {
        FxRepository {
            series: SeriesRepository::new(store.clone()),
            store,
            catalog: catalog.into(),
        }
    }

    pub fn load_catalog(&self) -> Result<FxCatalogDB> {
        Ok(self.store.read(&self.catalog)?)
    }
}

impl FxRepositoryTrait for FxRepository {
    fn load_exchange_rates(&self) -> Result<Vec<ExchangeRateSeries>> {
        let catalog = self.load_catalog()?;
        let mut pairs = Vec::with_capacity(catalog.series.len() + catalog.constants.len());
        for entry in catalog.series {
            let rates = self.series.read_index_series(&entry.file)?;
            debug!("Loaded {}/{} rates from {}", entry.from, entry.to, entry.file);
            pairs.push(ExchangeRateSeries::new(entry.from, entry.to, rates));
        }
        pairs.extend(catalog.constants.into_iter().map(ExchangeRateSeries::from));
        Ok(pairs)
    }
}
