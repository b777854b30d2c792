use log::debug;
use num_traits::ToPrimitive;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::goal_model::{ExpectedReturnGroup, GoalGroupResult, GoalParameters, GoalReport};
use crate::constants::END_AGE_STD_DEV;
use crate::errors::{CalculatorError, Error, Result};

/// Monte Carlo simulation of saving until retirement and spending afterwards.
///
/// Each trial draws one growth factor per year. The amount grows and receives
/// deposits until retirement; from then on withdrawals come out of it, and
/// once it is exhausted out of cash. A trial fails when cash runs out.
#[derive(Debug, Clone)]
pub struct GoalSimulation {
    parameters: GoalParameters,
    invested: f64,
    cash: f64,
    deposit: f64,
    withdrawal: f64,
    inflation_factor: f64,
}

struct Trial {
    end_year: i32,
    growth: Vec<f64>,
}

fn to_f64(value: Decimal, field: &str) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| Error::invalid_input(format!("{} {} is out of range", field, value)))
}

impl GoalSimulation {
    pub fn new(parameters: GoalParameters) -> Result<Self> {
        if parameters.trials == 0 {
            return Err(Error::invalid_input("at least one trial is required"));
        }
        if parameters.retirement_year < parameters.starting_year {
            return Err(Error::invalid_input(format!(
                "retirement year {} is before the starting year {}",
                parameters.retirement_year, parameters.starting_year
            )));
        }
        let inflation = to_f64(parameters.inflation, "inflation")?;
        Ok(Self {
            invested: to_f64(parameters.invested, "invested")?,
            cash: to_f64(parameters.cash, "cash")?,
            deposit: to_f64(parameters.yearly_deposit, "deposit")?,
            withdrawal: to_f64(parameters.yearly_withdrawal, "withdrawal")?,
            inflation_factor: 1.0 + inflation / 100.0,
            parameters,
        })
    }

    /// Success counts per expected return group plus their average.
    ///
    /// Groups run in parallel, each with its own generator seeded from the
    /// parameters and the group's position, so a seed always yields the same report.
    pub fn run(&self, groups: &BTreeMap<String, ExpectedReturnGroup>) -> Result<GoalReport> {
        if groups.is_empty() {
            return Err(Error::invalid_input("no expected return groups to simulate"));
        }
        for (name, group) in groups {
            group.validate(name)?;
        }
        let indexed: Vec<(u64, &String, &ExpectedReturnGroup)> = groups
            .iter()
            .enumerate()
            .map(|(i, (name, group))| (i as u64, name, group))
            .collect();

        let results = indexed
            .par_iter()
            .map(|(index, name, group)| -> Result<GoalGroupResult> {
                let seed = self.parameters.seed.wrapping_add(*index);
                let successes = self.successes(group, seed)?;
                debug!(
                    "{}: {}/{} successful trials",
                    name, successes, self.parameters.trials
                );
                Ok(self.group_result(name.to_string(), successes))
            })
            .collect::<Result<Vec<_>>>()?;

        let average_successes =
            results.iter().map(|r| r.successes).sum::<u64>() / results.len() as u64;
        let average = self.group_result("Average".to_string(), average_successes);
        Ok(GoalReport {
            groups: results,
            average,
        })
    }

    fn group_result(&self, name: String, successes: u64) -> GoalGroupResult {
        GoalGroupResult {
            name,
            successes,
            trials: self.parameters.trials,
            success_rate: successes as f64 / self.parameters.trials as f64,
        }
    }

    fn successes(&self, group: &ExpectedReturnGroup, seed: u64) -> Result<u64> {
        let returns = Normal::new(group.mu, group.sigma)
            .map_err(|e| CalculatorError::Calculation(format!("return distribution: {}", e)))?;
        let end_age = Normal::new(f64::from(self.parameters.end_year), END_AGE_STD_DEV)
            .map_err(|e| CalculatorError::Calculation(format!("end age distribution: {}", e)))?;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut successes = 0;
        for _ in 0..self.parameters.trials {
            let end_year = end_age.sample(&mut rng).round() as i32;
            let years = (end_year.max(self.parameters.retirement_year)
                - self.parameters.starting_year
                + 1)
            .max(0) as usize;
            let growth = (0..years)
                .map(|_| 1.0 + returns.sample(&mut rng) / 100.0)
                .collect();
            if self.succeeds(&Trial { end_year, growth }) {
                successes += 1;
            }
        }
        Ok(successes)
    }

    fn real(&self, amount: f64, offset: usize) -> f64 {
        amount * self.inflation_factor.powi(offset as i32)
    }

    fn succeeds(&self, trial: &Trial) -> bool {
        let start = self.parameters.starting_year;
        let retirement = self.parameters.retirement_year;
        let mut amount = self.invested;
        let mut cash = self.cash;

        for year in start..retirement {
            let i = (year - start) as usize;
            amount = amount * trial.growth[i] + self.real(self.deposit, i);
        }

        for year in retirement..=trial.end_year {
            let i = (year - start) as usize;
            amount -= self.real(self.withdrawal, i);
            if amount > 0.0 {
                amount *= trial.growth[i];
            } else {
                cash += amount;
                amount = 0.0;
            }
            if cash <= 0.0 {
                return false;
            }
        }
        amount + cash > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parameters(withdrawal: Decimal) -> GoalParameters {
        GoalParameters {
            trials: 500,
            seed: 42,
            starting_year: 2025,
            retirement_year: 2040,
            end_year: 2070,
            invested: dec!(100000),
            cash: dec!(10000),
            yearly_deposit: dec!(12000),
            yearly_withdrawal: withdrawal,
            inflation: dec!(3),
        }
    }

    fn groups() -> BTreeMap<String, ExpectedReturnGroup> {
        BTreeMap::from([
            ("bonds".to_string(), ExpectedReturnGroup { mu: 2.0, sigma: 5.0 }),
            ("equity".to_string(), ExpectedReturnGroup { mu: 7.0, sigma: 18.0 }),
        ])
    }

    #[test]
    fn test_same_seed_same_report() {
        let simulation = GoalSimulation::new(parameters(dec!(60000))).unwrap();
        let first = simulation.run(&groups()).unwrap();
        let second = simulation.run(&groups()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.groups.len(), 2);
        assert_eq!(first.groups[0].name, "bonds");
    }

    #[test]
    fn test_no_withdrawals_always_succeed() {
        let steady = BTreeMap::from([("steady".to_string(), ExpectedReturnGroup { mu: 5.0, sigma: 1.0 })]);
        let simulation = GoalSimulation::new(parameters(Decimal::ZERO)).unwrap();
        let report = simulation.run(&steady).unwrap();
        assert_eq!(report.groups[0].successes, 500);
        assert_eq!(report.average.success_rate, 1.0);
    }

    #[test]
    fn test_huge_withdrawals_always_fail() {
        let simulation = GoalSimulation::new(parameters(dec!(100000000))).unwrap();
        let report = simulation.run(&groups()).unwrap();
        assert!(report.groups.iter().all(|group| group.successes == 0));
    }

    #[test]
    fn test_invalid_parameters() {
        let mut p = parameters(Decimal::ZERO);
        p.trials = 0;
        assert!(GoalSimulation::new(p).is_err());

        let mut p = parameters(Decimal::ZERO);
        p.retirement_year = 2000;
        assert!(GoalSimulation::new(p).is_err());

        let simulation = GoalSimulation::new(parameters(Decimal::ZERO)).unwrap();
        assert!(simulation.run(&BTreeMap::new()).is_err());
    }

    #[test]
    fn test_return_groups_are_validated_before_running() {
        let simulation = GoalSimulation::new(parameters(Decimal::ZERO)).unwrap();
        let bad_groups = [
            ExpectedReturnGroup { mu: 5.0, sigma: -1.0 },
            ExpectedReturnGroup { mu: 5.0, sigma: f64::INFINITY },
            ExpectedReturnGroup { mu: f64::NAN, sigma: 1.0 },
        ];
        for bad in bad_groups {
            let mut mixed = groups();
            mixed.insert("bad".to_string(), bad);
            let err = simulation.run(&mixed).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{:?} gave {:?}", bad, err);
        }

        let flat = BTreeMap::from([("flat".to_string(), ExpectedReturnGroup { mu: 5.0, sigma: 0.0 })]);
        assert!(simulation.run(&flat).is_ok());
    }
}
