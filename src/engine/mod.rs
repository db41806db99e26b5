pub mod rotation;
pub mod volatility;

pub use rotation::MomentumRotationEngine;
pub use volatility::{holding_targets, HoldingTarget, VolatilityRegimeEngine};
