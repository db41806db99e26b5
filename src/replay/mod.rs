pub mod dataset;
pub mod paper;
pub mod runner;

pub use dataset::{DailyBar, Dataset, ReplayMarket};
pub use paper::{PaperBroker, PaperFill};
pub use runner::{run, ReplaySummary};
