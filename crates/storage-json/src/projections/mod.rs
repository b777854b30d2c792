//! JSON storage implementation for the expected return table.

mod repository;

pub use repository::ExpectedReturnsRepository;
