//! Forward-looking projections of the portfolio.

mod goal_model;
mod goal_simulation;
mod percentile;
mod projections_traits;

pub use goal_model::*;
pub use goal_simulation::GoalSimulation;
pub use percentile::portfolio_percentile;
pub use projections_traits::ExpectedReturnsRepositoryTrait;
