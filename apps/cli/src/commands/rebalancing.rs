//! Rebalancing commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use moneycalc_core::rebalancing::RebalancingService;

use crate::main_lib::AppState;
use crate::output::print_json;

/// Arguments for the buy command.
#[derive(Args, Debug)]
pub struct BuyArgs {
    /// Contribution in USD
    #[arg(long, default_value = "0")]
    pub usd: Decimal,

    /// Contribution in EUR, converted at the evaluation month's rate
    #[arg(long, default_value = "0")]
    pub eur: Decimal,

    /// Transfer fee, split across the purchases
    #[arg(long, default_value = "0")]
    pub transfer_fee: Decimal,
}

/// Arguments for the sell command.
#[derive(Args, Debug)]
pub struct SellArgs {
    /// Amount to raise, in USD
    #[arg(long)]
    pub amount: Decimal,

    /// Allow the last sale to exceed the amount
    #[arg(long)]
    pub oversell: bool,
}

pub fn buy(state: &AppState, as_of: NaiveDate, args: BuyArgs) -> Result<()> {
    let market = state.load_market()?;
    let investments = state.load_investments()?;
    let config = state.load_rebalancing_config()?;
    let service = RebalancingService::new(market.context(as_of), &config, &investments);

    let result = service.buy(args.usd, args.eur, args.transfer_fee)?;
    tracing::info!(
        "Buying {} tickers, {} left over",
        result.shares.len(),
        result.remainder.round_dp(2)
    );
    print_json(&result)
}

pub fn sell(state: &AppState, as_of: NaiveDate, args: SellArgs) -> Result<()> {
    let market = state.load_market()?;
    let investments = state.load_investments()?;
    let config = state.load_rebalancing_config()?;
    let service = RebalancingService::new(market.context(as_of), &config, &investments);

    let result = service.sell(args.amount, args.oversell)?;
    if result.sold < result.withdrawal {
        tracing::warn!(
            "Only {} of {} could be raised",
            result.sold.round_dp(2),
            result.withdrawal.round_dp(2)
        );
    }
    print_json(&result)
}
