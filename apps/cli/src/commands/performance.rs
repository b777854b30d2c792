//! Return commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use moneycalc_core::portfolio::performance::{
    BenchmarkMapper, CashFlow, ModifiedDietzReturn, ModifiedDietzReturnResult, PortfolioReturns,
};
use moneycalc_core::Currency;

use crate::main_lib::AppState;
use crate::output::print_json;

/// Arguments for the dietz command.
#[derive(Args, Debug)]
pub struct DietzArgs {
    /// First day of the period (YYYY-MM-DD). Defaults to the first entry.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the period (YYYY-MM-DD). Defaults to the last exit or the evaluation date.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Reporting currency
    #[arg(long, default_value = "USD")]
    pub currency: Currency,

    /// Remove inflation (requires the price index currency)
    #[arg(long)]
    pub real: bool,

    /// Also chain monthly sub-period returns
    #[arg(long)]
    pub linked: bool,

    /// Include the dated cash flows of the period
    #[arg(long)]
    pub flows: bool,

    /// Also compute the return had every lot bought this ticker instead
    #[arg(long)]
    pub benchmark: Option<Currency>,
}

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    /// Reporting currency
    #[arg(long, default_value = "USD")]
    pub currency: Currency,

    /// Remove inflation (requires the price index currency)
    #[arg(long)]
    pub real: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DietzOutput {
    currency: Currency,
    nominal: bool,
    initial: NaiveDate,
    final_date: NaiveDate,
    #[serde(flatten)]
    result: ModifiedDietzReturnResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_linked: Option<ModifiedDietzReturnResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cash_flows: Option<Vec<CashFlow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<BenchmarkOutput>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BenchmarkOutput {
    ticker: Currency,
    #[serde(flatten)]
    result: ModifiedDietzReturnResult,
}

pub fn dietz(state: &AppState, as_of: NaiveDate, args: DietzArgs) -> Result<()> {
    let market = state.load_market()?;
    let investments = state.load_investments()?;
    let context = market.context(as_of);
    let nominal = !args.real;

    let calculator = match (args.from, args.to) {
        (None, None) => {
            ModifiedDietzReturn::for_whole_history(context, &investments, args.currency, nominal)?
        }
        (from, to) => {
            let whole =
                ModifiedDietzReturn::for_whole_history(context, &investments, args.currency, nominal)?;
            ModifiedDietzReturn::new(
                context,
                &investments,
                args.currency,
                nominal,
                from.unwrap_or_else(|| whole.initial()),
                to.unwrap_or_else(|| whole.final_date()),
            )?
        }
    };

    let result = calculator.get()?;
    tracing::info!(
        "Return from {} to {}: {}",
        calculator.initial(),
        calculator.final_date(),
        result.money_weighted.round_dp(4)
    );
    let output = DietzOutput {
        currency: args.currency,
        nominal,
        initial: calculator.initial(),
        final_date: calculator.final_date(),
        result,
        monthly_linked: if args.linked {
            Some(calculator.monthly_linked()?)
        } else {
            None
        },
        cash_flows: if args.flows {
            Some(calculator.cash_flows()?)
        } else {
            None
        },
        benchmark: None,
    };
    let output = match args.benchmark {
        Some(ticker) => {
            let seen = state.load_seen_prices(ticker)?;
            let mapper = BenchmarkMapper::new(&market.fx, ticker, &investments, &seen);
            let replayed = mapper.map_all(&investments)?;
            let result = ModifiedDietzReturn::new(
                context,
                &replayed,
                args.currency,
                nominal,
                output.initial,
                output.final_date,
            )?
            .get()?;
            tracing::info!("{} benchmark return: {}", ticker, result.money_weighted.round_dp(4));
            DietzOutput {
                benchmark: Some(BenchmarkOutput { ticker, result }),
                ..output
            }
        }
        None => output,
    };
    print_json(&output)
}

pub fn returns(state: &AppState, as_of: NaiveDate, args: ReturnsArgs) -> Result<()> {
    let market = state.load_market()?;
    let investments = state.load_investments()?;
    let report =
        PortfolioReturns::yearly(market.context(as_of), &investments, args.currency, !args.real)?;
    print_json(&report)
}
