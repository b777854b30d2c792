//! Aggregation module - trailing-window averages, sums and changes over series.

mod aggregation_traits;
mod simple_aggregation;
mod sliding_window;

pub use aggregation_traits::Aggregation;
pub use simple_aggregation::SimpleAggregation;
pub use sliding_window::SlidingWindow;
