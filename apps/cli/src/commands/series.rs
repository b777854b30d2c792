//! Series commands: currency conversion, inflation adjustment and aggregation.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;

use moneycalc_core::aggregation::{Aggregation, SimpleAggregation, SlidingWindow};
use moneycalc_core::series::{MoneyAmountSeries, SeriesRepositoryTrait, YearMonth};
use moneycalc_core::{Currency, MoneyAmount};

use crate::main_lib::AppState;
use crate::output::print_json;

/// Arguments for the exchange command.
#[derive(Args, Debug)]
pub struct ExchangeArgs {
    /// Amount to convert
    #[arg(long, conflicts_with = "series", required_unless_present = "series")]
    pub amount: Option<Decimal>,

    /// Currency of the amount
    #[arg(long, default_value = "USD")]
    pub from: Currency,

    /// Target currency
    #[arg(long)]
    pub to: Currency,

    /// Month of the rate (YYYY-MM). Defaults to the evaluation month.
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Convert every month of this series instead
    #[arg(long)]
    pub series: Option<String>,
}

/// Arguments for the inflate command.
#[derive(Args, Debug)]
pub struct InflateArgs {
    /// Amount, in the price index currency
    #[arg(long, conflicts_with = "series", required_unless_present = "series")]
    pub amount: Option<Decimal>,

    /// Month the amount was worth (YYYY-MM)
    #[arg(long, required_unless_present = "series")]
    pub from_month: Option<YearMonth>,

    /// Month to express it in (YYYY-MM). Defaults to the last month of the index.
    #[arg(long)]
    pub to_month: Option<YearMonth>,

    /// Adjust every month of this series instead
    #[arg(long)]
    pub series: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Average,
    Sum,
    Change,
    PercentChange,
}

/// Arguments for the aggregate command.
#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Series to add up before aggregating
    #[arg(long, required = true, num_args = 1..)]
    pub series: Vec<String>,

    /// Window length in months
    #[arg(long, default_value = "12")]
    pub months: usize,

    #[arg(long, value_enum, default_value = "average")]
    pub op: AggregateOp,

    /// Only emit months with a full window
    #[arg(long)]
    pub sliding: bool,

    /// Keep sliding with zeros after the data ends, up to this month (sliding only)
    #[arg(long, requires = "sliding")]
    pub pad_until: Option<YearMonth>,

    /// Convert to this currency first
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Express every month in the money of the index's last month first
    #[arg(long)]
    pub real: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExchangeOutput {
    month: YearMonth,
    rate: Decimal,
    amount: MoneyAmount,
    converted: MoneyAmount,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InflateOutput {
    from_month: YearMonth,
    to_month: YearMonth,
    amount: MoneyAmount,
    adjusted: MoneyAmount,
}

pub fn exchange(state: &AppState, as_of: NaiveDate, args: ExchangeArgs) -> Result<()> {
    let market = state.load_market()?;
    if let Some(name) = args.series {
        let series = state.series.read_money_series(&name)?;
        return print_json(&market.fx.exchange_series(&series, args.to)?);
    }
    let Some(value) = args.amount else {
        bail!("either --amount or --series is required");
    };

    let month = args.month.unwrap_or_else(|| YearMonth::from_date(as_of));
    let amount = MoneyAmount::new(value, args.from);
    let output = ExchangeOutput {
        month,
        rate: market.fx.rate(args.from, args.to, month)?,
        converted: market.fx.exchange(&amount, args.to, month)?,
        amount,
    };
    print_json(&output)
}

pub fn inflate(state: &AppState, args: InflateArgs) -> Result<()> {
    let market = state.load_market()?;
    let inflation = &market.inflation;
    let to_month = args.to_month.unwrap_or_else(|| inflation.get_to());

    if let Some(name) = args.series {
        let series = state.series.read_money_series(&name)?;
        return print_json(&inflation.adjust_series(&series, to_month)?);
    }
    let (Some(value), Some(from_month)) = (args.amount, args.from_month) else {
        bail!("--amount and --from-month are required without --series");
    };

    let amount = MoneyAmount::new(value, inflation.currency());
    let output = InflateOutput {
        from_month,
        to_month,
        adjusted: inflation.adjust(&amount, from_month, to_month)?,
        amount,
    };
    print_json(&output)
}

pub fn aggregate(state: &AppState, args: AggregateArgs) -> Result<()> {
    let names: Vec<&str> = args.series.iter().map(String::as_str).collect();
    let mut series: MoneyAmountSeries = state.series.sum_money_series(&names)?;

    if args.currency.is_some() || args.real {
        let market = state.load_market()?;
        if let Some(currency) = args.currency {
            series = market.fx.exchange_series(&series, currency)?;
        }
        if args.real {
            series = market
                .inflation
                .adjust_series(&series, market.inflation.get_to())?;
        }
    }

    let aggregation: Box<dyn Aggregation> = if args.sliding {
        let window = SlidingWindow::new(args.months)?;
        Box::new(match args.pad_until {
            Some(horizon) => window.padded_until(horizon),
            None => window,
        })
    } else {
        Box::new(SimpleAggregation::new(args.months)?)
    };

    match args.op {
        AggregateOp::Average => print_json(&aggregation.average(&series)?),
        AggregateOp::Sum => print_json(&aggregation.sum(&series)?),
        AggregateOp::Change => print_json(&aggregation.change(&series)?),
        AggregateOp::PercentChange => print_json(&aggregation.percent_change(&series)?),
    }
}
