//! Retirement goal simulation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Yearly return distribution of one asset mix, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedReturnGroup {
    pub mu: f64,
    pub sigma: f64,
}

impl ExpectedReturnGroup {
    /// The mean must be finite and the standard deviation finite and not negative.
    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.mu.is_finite() {
            return Err(Error::invalid_input(format!(
                "expected return of '{}' is not finite: {}",
                name, self.mu
            )));
        }
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(Error::invalid_input(format!(
                "volatility of '{}' must be finite and not negative, got {}",
                name, self.sigma
            )));
        }
        Ok(())
    }
}

/// Inputs of a Monte Carlo retirement goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalParameters {
    pub trials: usize,
    pub seed: u64,
    /// First simulated year; deposits and withdrawals are in this year's money.
    pub starting_year: i32,
    /// First year of withdrawals.
    pub retirement_year: i32,
    /// Expected last year of withdrawals, jittered per trial.
    pub end_year: i32,
    pub invested: Decimal,
    pub cash: Decimal,
    pub yearly_deposit: Decimal,
    pub yearly_withdrawal: Decimal,
    /// Yearly inflation in percent.
    pub inflation: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalGroupResult {
    pub name: String,
    pub successes: u64,
    pub trials: usize,
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalReport {
    pub groups: Vec<GoalGroupResult>,
    pub average: GoalGroupResult,
}
