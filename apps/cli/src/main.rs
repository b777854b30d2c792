//! MoneyCalc CLI - returns, rebalancing and projections over a JSON data directory.
//!
//! # Usage
//!
//! ```bash
//! # Return of the ledger over 2024
//! moneycalc dietz --from 2024-01-01 --to 2024-12-31
//!
//! # Buy with 1000 USD and 500 EUR
//! moneycalc buy --usd 1000 --eur 500 --transfer-fee 10
//!
//! # Average monthly spending over the last year, in real terms
//! moneycalc aggregate --series spending/card.json --months 12 --op average --real
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod main_lib;
mod output;

use cli::{Cli, Commands};
use config::Config;
use main_lib::{init_tracing, AppState};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let as_of = cli
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!("Evaluating as of {}", as_of);
    let state = AppState::new(config);

    match cli.command {
        Commands::Dietz(args) => commands::performance::dietz(&state, as_of, args)?,
        Commands::Returns(args) => commands::performance::returns(&state, as_of, args)?,
        Commands::Buy(args) => commands::rebalancing::buy(&state, as_of, args)?,
        Commands::Sell(args) => commands::rebalancing::sell(&state, as_of, args)?,
        Commands::Exchange(args) => commands::series::exchange(&state, as_of, args)?,
        Commands::Inflate(args) => commands::series::inflate(&state, args)?,
        Commands::Aggregate(args) => commands::series::aggregate(&state, args)?,
        Commands::Percentile(args) => commands::projections::percentile(args)?,
        Commands::Goal(args) => commands::projections::goal(&state, args)?,
    }

    Ok(())
}
