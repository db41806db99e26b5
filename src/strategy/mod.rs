pub mod momentum_rank;
pub mod percentile_regime;
pub mod reallocation;
