//! JSON storage implementation for the investment ledger.

mod repository;

pub use repository::InvestmentRepository;
