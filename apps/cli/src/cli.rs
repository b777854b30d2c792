//! CLI argument definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::{
    AggregateArgs, BuyArgs, DietzArgs, ExchangeArgs, GoalArgs, InflateArgs, PercentileArgs,
    ReturnsArgs, SellArgs,
};

/// MoneyCalc - personal finance analysis over monthly series and an investment ledger
#[derive(Parser)]
#[command(name = "moneycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true, env = "MC_AS_OF")]
    pub as_of: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Modified Dietz return of the ledger over a period
    Dietz(DietzArgs),

    /// Calendar-year returns of the ledger
    Returns(ReturnsArgs),

    /// Plan the purchase of a contribution toward the target weights
    Buy(BuyArgs),

    /// Plan which lots to sell to raise a withdrawal
    Sell(SellArgs),

    /// Convert an amount or a series to another currency
    Exchange(ExchangeArgs),

    /// Express an amount or a series in the money of another month
    Inflate(InflateArgs),

    /// Trailing-window statistics over one or more series
    Aggregate(AggregateArgs),

    /// Log-normal percentile of a future portfolio value
    Percentile(PercentileArgs),

    /// Monte Carlo success rate of a retirement plan
    Goal(GoalArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_evaluation_date() {
        let cli = Cli::try_parse_from(["moneycalc", "sell", "--amount", "150.5", "--as-of", "2024-05-15"])
            .unwrap();
        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2024, 5, 15));
        match cli.command {
            Commands::Sell(args) => {
                assert_eq!(args.amount.to_string(), "150.5");
                assert!(!args.oversell);
            }
            _ => panic!("expected the sell command"),
        }
    }

    #[test]
    fn test_exchange_needs_an_amount_or_a_series() {
        assert!(Cli::try_parse_from(["moneycalc", "exchange", "--to", "EUR"]).is_err());
        assert!(Cli::try_parse_from(["moneycalc", "exchange", "--to", "EUR", "--amount", "1"]).is_ok());
        assert!(Cli::try_parse_from(["moneycalc", "exchange", "--to", "DOGE", "--amount", "1"]).is_err());
    }
}
