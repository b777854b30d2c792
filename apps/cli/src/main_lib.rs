use chrono::NaiveDate;
use moneycalc_core::fx::{CurrencyConverter, FxRepositoryTrait};
use moneycalc_core::inflation::CpiInflation;
use moneycalc_core::investments::{Investment, InvestmentRepositoryTrait};
use moneycalc_core::portfolio::performance::{SeenPrice, SeenPricesRepositoryTrait};
use moneycalc_core::projections::{ExpectedReturnGroup, ExpectedReturnsRepositoryTrait};
use moneycalc_core::rebalancing::{RebalancingConfig, RebalancingConfigRepositoryTrait};
use moneycalc_core::series::SeriesRepositoryTrait;
use moneycalc_core::{Currency, MarketContext};
use moneycalc_storage_json::{
    ExpectedReturnsRepository, FxRepository, InvestmentRepository, JsonStore,
    RebalancingConfigRepository, SeenPricesRepository, SeriesRepository,
};
use std::collections::BTreeMap;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries the JSON result.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Rates and price index every report is evaluated against.
pub struct Market {
    pub fx: CurrencyConverter,
    pub inflation: CpiInflation,
}

impl Market {
    pub fn context(&self, as_of: NaiveDate) -> MarketContext<'_> {
        MarketContext::new(&self.fx, &self.inflation, as_of)
    }
}

/// The repositories over the configured data directory.
pub struct AppState {
    pub config: Config,
    pub series: SeriesRepository,
    investments: InvestmentRepository,
    fx: FxRepository,
    rebalancing: RebalancingConfigRepository,
    expected_returns: ExpectedReturnsRepository,
    seen_prices: SeenPricesRepository,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = JsonStore::new(config.data_dir.clone());
        tracing::debug!("Data directory: {}", store.root().display());
        Self {
            series: SeriesRepository::new(store.clone()),
            investments: InvestmentRepository::new(store.clone()),
            fx: FxRepository::new(store.clone(), config.fx_catalog.clone()),
            rebalancing: RebalancingConfigRepository::new(store.clone(), config.rebalancing.clone()),
            expected_returns: ExpectedReturnsRepository::new(
                store.clone(),
                config.expected_returns.clone(),
            ),
            seen_prices: SeenPricesRepository::new(store, config.seen_prices.clone()),
            config,
        }
    }

    pub fn load_market(&self) -> anyhow::Result<Market> {
        let fx = CurrencyConverter::new(self.fx.load_exchange_rates()?)?;
        let index = self.series.read_index_series(&self.config.inflation_series)?;
        let inflation = CpiInflation::new(Currency::USD, index)?;
        tracing::debug!(
            "Inflation index covers {} to {}",
            inflation.get_from(),
            inflation.get_to()
        );
        Ok(Market { fx, inflation })
    }

    pub fn load_investments(&self) -> anyhow::Result<Vec<Investment>> {
        Ok(self.investments.load_investments(&self.config.investments)?)
    }

    pub fn load_rebalancing_config(&self) -> anyhow::Result<RebalancingConfig> {
        Ok(self.rebalancing.load_rebalancing_config()?)
    }

    pub fn load_expected_returns(&self) -> anyhow::Result<BTreeMap<String, ExpectedReturnGroup>> {
        Ok(self.expected_returns.load_expected_returns()?)
    }

    pub fn load_seen_prices(&self, benchmark: Currency) -> anyhow::Result<Vec<SeenPrice>> {
        Ok(self.seen_prices.load_seen_prices(benchmark)?)
    }
}
