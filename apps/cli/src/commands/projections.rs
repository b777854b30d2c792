//! Projection commands.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use moneycalc_core::projections::{portfolio_percentile, GoalParameters, GoalSimulation};

use crate::main_lib::AppState;
use crate::output::print_json;

/// Arguments for the percentile command.
#[derive(Args, Debug)]
pub struct PercentileArgs {
    /// Value today
    #[arg(long)]
    pub initial: f64,

    /// Expected yearly growth rate (0.07 for 7%)
    #[arg(long)]
    pub cagr: f64,

    /// Yearly volatility (0.15 for 15%)
    #[arg(long)]
    pub volatility: f64,

    #[arg(long)]
    pub years: u32,

    /// Percentile strictly between 0 and 1
    #[arg(long, default_value = "0.5")]
    pub percentile: f64,
}

/// Arguments for the goal command.
#[derive(Args, Debug)]
pub struct GoalArgs {
    #[arg(long, default_value = "10000")]
    pub trials: usize,

    #[arg(long, default_value = "0")]
    pub seed: u64,

    #[arg(long)]
    pub starting_year: i32,

    #[arg(long)]
    pub retirement_year: i32,

    /// Expected last year of withdrawals
    #[arg(long)]
    pub end_year: i32,

    #[arg(long, default_value = "0")]
    pub invested: Decimal,

    #[arg(long, default_value = "0")]
    pub cash: Decimal,

    /// Yearly deposit until retirement, in today's money
    #[arg(long, default_value = "0")]
    pub deposit: Decimal,

    /// Yearly withdrawal from retirement on, in today's money
    #[arg(long, default_value = "0")]
    pub withdrawal: Decimal,

    /// Yearly inflation in percent
    #[arg(long, default_value = "0")]
    pub inflation: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PercentileOutput {
    years: u32,
    percentile: f64,
    value: f64,
}

pub fn percentile(args: PercentileArgs) -> Result<()> {
    let value = portfolio_percentile(
        args.initial,
        args.cagr,
        args.volatility,
        args.years,
        args.percentile,
    )?;
    print_json(&PercentileOutput {
        years: args.years,
        percentile: args.percentile,
        value,
    })
}

pub fn goal(state: &AppState, args: GoalArgs) -> Result<()> {
    let groups = state.load_expected_returns()?;
    let parameters = GoalParameters {
        trials: args.trials,
        seed: args.seed,
        starting_year: args.starting_year,
        retirement_year: args.retirement_year,
        end_year: args.end_year,
        invested: args.invested,
        cash: args.cash,
        yearly_deposit: args.deposit,
        yearly_withdrawal: args.withdrawal,
        inflation: args.inflation,
    };
    tracing::info!(
        "Simulating {} trials for {} return groups",
        parameters.trials,
        groups.len()
    );
    let report = GoalSimulation::new(parameters)?.run(&groups)?;
    print_json(&report)
}
