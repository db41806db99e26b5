pub mod percentile;
pub mod rolling_window;
