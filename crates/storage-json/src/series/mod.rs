//! JSON storage implementation for monthly series.

mod model;
mod repository;

pub use model::{SeriesFileDB, SeriesPointDB};
pub use repository::SeriesRepository;
