//! Investments module - ledger lots and the repository trait.

mod investments_model;
mod investments_traits;

pub use investments_model::{Investment, InvestmentAsset, InvestmentEvent, InvestmentType};
pub use investments_traits::InvestmentRepositoryTrait;
