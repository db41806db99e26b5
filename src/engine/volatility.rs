use chrono::Duration;

use crate::config::VolatilityConfig;
use crate::error::{EngineError, EngineResult};
use crate::indicator::rolling_window::RollingObservationWindow;
use crate::model::signal::RegimeSignal;
use crate::ports::{HistoryProvider, OrderExecution};
use crate::strategy::percentile_regime::PercentileRegimeClassifier;

/// Target weight handed to the execution layer for one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingTarget {
    pub instrument: String,
    pub weight: f64,
    pub liquidate_existing: bool,
}

/// Weights a regime signal translates into, in submission order.
pub fn holding_targets(signal: RegimeSignal, short_leg: &str, long_leg: &str) -> Vec<HoldingTarget> {
    let target = |instrument: &str, weight: f64, liquidate_existing: bool| HoldingTarget {
        instrument: instrument.to_string(),
        weight,
        liquidate_existing,
    };
    match signal {
        RegimeSignal::ShortBias => vec![target(short_leg, 1.0, true)],
        RegimeSignal::LongBias => vec![target(short_leg, -1.0, false), target(long_leg, 1.0, true)],
        RegimeSignal::ExitLong => vec![target(long_leg, -1.0, false)],
        RegimeSignal::Hold => Vec::new(),
    }
}

/// Market-tick driven strategy: percentile regime of an observation series,
/// expressed through a short leg and a long leg.
pub struct VolatilityRegimeEngine<H: HistoryProvider, E: OrderExecution> {
    cfg: VolatilityConfig,
    window: RollingObservationWindow,
    classifier: PercentileRegimeClassifier,
    history: H,
    execution: E,
}

impl<H: HistoryProvider, E: OrderExecution> VolatilityRegimeEngine<H, E> {
    pub fn new(cfg: VolatilityConfig, history: H, execution: E) -> EngineResult<Self> {
        cfg.validate()?;
        let window = RollingObservationWindow::new(cfg.window_capacity)?;
        let classifier = PercentileRegimeClassifier::new(cfg.thresholds())?;
        Ok(Self {
            cfg,
            window,
            classifier,
            history,
            execution,
        })
    }

    /// Warm the window from history. Returns the number of observations pushed.
    /// A non-finite close rejects the whole batch and leaves the window untouched.
    pub fn seed(&mut self) -> EngineResult<usize> {
        let closes = self.history.history(
            &self.cfg.observation_symbol,
            Duration::days(self.cfg.seed_days),
        )?;
        if let Some(bad) = closes.iter().find(|c| !c.is_finite()) {
            return Err(EngineError::data_unavailable(
                &self.cfg.observation_symbol,
                format!("non-finite seed observation {bad}"),
            ));
        }
        let n = closes.len();
        self.window.extend(closes);
        tracing::info!(
            symbol = %self.cfg.observation_symbol,
            seeded = n,
            ready = self.window.is_ready(),
            "Seeded observation window"
        );
        Ok(n)
    }

    /// Handle one price print. Only the observation series is considered; the
    /// window must be full before a signal is produced.
    pub fn on_market_tick(&mut self, instrument: &str, price: f64) -> EngineResult<Option<RegimeSignal>> {
        if instrument != self.cfg.observation_symbol {
            return Ok(None);
        }
        if !price.is_finite() {
            tracing::warn!(instrument, price, "Ignoring non-finite observation");
            return Ok(None);
        }

        self.window.push(price);
        if !self.window.is_ready() {
            tracing::debug!(
                filled = self.window.len(),
                capacity = self.window.capacity(),
                "Observation window not ready"
            );
            return Ok(None);
        }

        let signal = self.classifier.evaluate(&self.window, price);
        if signal.is_actionable() {
            tracing::info!(observation = price, signal = %signal, "Regime signal");
        }
        for t in holding_targets(signal, &self.cfg.short_leg, &self.cfg.long_leg) {
            self.execution
                .set_holdings(&t.instrument, t.weight, t.liquidate_existing)?;
        }
        Ok(Some(signal))
    }

    pub fn window(&self) -> &RollingObservationWindow {
        &self.window
    }

    pub fn execution(&self) -> &E {
        &self.execution
    }
}
