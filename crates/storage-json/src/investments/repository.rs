use log::debug;
use moneycalc_core::investments::{Investment, InvestmentRepositoryTrait};
use moneycalc_core::Result;

use crate::store::JsonStore;

pub struct InvestmentRepository {
    store: JsonStore,
}

impl InvestmentRepository {
    pub fn new(store: JsonStore) -> Self {
        InvestmentRepository { store }
    }
}

impl InvestmentRepositoryTrait for InvestmentRepository {
    fn load_investments(&self, name: &str) -> Result<Vec<Investment>> {
        let investments: Vec<Investment> = self.store.read(name)?;
        debug!("Loaded {} investments from {}", investments.len(), name);
        Ok(investments)
    }
}
