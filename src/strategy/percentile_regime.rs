use crate::error::{EngineError, EngineResult};
use crate::indicator::percentile::percentile_sorted;
use crate::indicator::rolling_window::RollingObservationWindow;
use crate::model::signal::RegimeSignal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeThresholds {
    /// `v >= P(short_bias_pct)` selects `ShortBias`.
    pub short_bias_pct: f64,
    /// `v < P(long_bias_pct)` selects `LongBias`.
    pub long_bias_pct: f64,
    /// `v < P(exit_long_pct)` selects `ExitLong`.
    pub exit_long_pct: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            short_bias_pct: 90.0,
            long_bias_pct: 80.0,
            exit_long_pct: 10.0,
        }
    }
}

impl RegimeThresholds {
    pub fn validate(&self) -> EngineResult<()> {
        let all = [self.exit_long_pct, self.long_bias_pct, self.short_bias_pct];
        if all.iter().any(|p| !p.is_finite() || !(0.0..=100.0).contains(p)) {
            return Err(EngineError::Config(format!(
                "percentile thresholds must lie in [0, 100], got {:?}",
                self
            )));
        }
        if !(self.exit_long_pct <= self.long_bias_pct && self.long_bias_pct <= self.short_bias_pct)
        {
            return Err(EngineError::Config(format!(
                "percentile thresholds out of order: need exit_long <= long_bias <= short_bias, got {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// Threshold values resolved against one window snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeLevels {
    pub short_bias: f64,
    pub long_bias: f64,
    pub exit_long: f64,
}

#[derive(Debug, Clone)]
pub struct PercentileRegimeClassifier {
    thresholds: RegimeThresholds,
}

impl PercentileRegimeClassifier {
    pub fn new(thresholds: RegimeThresholds) -> EngineResult<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> RegimeThresholds {
        self.thresholds
    }

    /// Classify `value` against the window. Abstains with `Hold` until the window is full.
    ///
    /// By convention `value` has already been pushed into `window`.
    pub fn evaluate(&self, window: &RollingObservationWindow, value: f64) -> RegimeSignal {
        if !window.is_ready() {
            return RegimeSignal::Hold;
        }
        self.evaluate_snapshot(&window.snapshot(), value)
    }

    /// Classify against an explicit snapshot. All three levels come from the same copy.
    pub fn evaluate_snapshot(&self, snapshot: &[f64], value: f64) -> RegimeSignal {
        let Some(levels) = self.levels(snapshot) else {
            return RegimeSignal::Hold;
        };
        if value >= levels.short_bias {
            RegimeSignal::ShortBias
        } else if value < levels.long_bias {
            RegimeSignal::LongBias
        } else if value < levels.exit_long {
            // Shadowed by the long-bias branch whenever exit_long <= long_bias.
            RegimeSignal::ExitLong
        } else {
            RegimeSignal::Hold
        }
    }

    pub fn levels(&self, snapshot: &[f64]) -> Option<RegimeLevels> {
        if snapshot.is_empty() {
            return None;
        }
        let mut sorted = snapshot.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(RegimeLevels {
            short_bias: percentile_sorted(&sorted, self.thresholds.short_bias_pct),
            long_bias: percentile_sorted(&sorted, self.thresholds.long_bias_pct),
            exit_long: percentile_sorted(&sorted, self.thresholds.exit_long_pct),
        })
    }
}
