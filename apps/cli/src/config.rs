use std::path::PathBuf;

pub struct Config {
    pub data_dir: PathBuf,
    pub investments: String,
    pub inflation_series: String,
    pub fx_catalog: String,
    pub rebalancing: String,
    pub expected_returns: String,
    pub seen_prices: String,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };
        Self {
            data_dir: PathBuf::from(var("MC_DATA_DIR", "./data")),
            investments: var("MC_INVESTMENTS", "investments.json"),
            inflation_series: var("MC_INFLATION_SERIES", "index/usd-cpi.json"),
            fx_catalog: var("MC_FX_CATALOG", "fx.json"),
            rebalancing: var("MC_REBALANCING", "rebalancing.json"),
            expected_returns: var("MC_EXPECTED_RETURNS", "index/expected-returns.json"),
            seen_prices: var("MC_SEEN_PRICES", "index/seen-prices.json"),
            log_format: var("MC_LOG_FORMAT", "text"),
        }
    }
}
