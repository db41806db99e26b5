use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::config::Config;
use crate::engine::{MomentumRotationEngine, VolatilityRegimeEngine};
use crate::model::signal::RegimeSignal;
use crate::model::tick::Tick;
use crate::replay::dataset::{Dataset, ReplayMarket};
use crate::replay::paper::PaperBroker;

#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    /// Observations pushed into the window from the warm-up period.
    pub seeded: usize,
    /// Dates replayed after warm-up.
    pub days: usize,
    pub regime_signals: usize,
    pub rotation_cycles: usize,
    pub aborted_cycles: usize,
    pub fills: usize,
    pub final_equity: f64,
}

/// Replay every dataset date through both engines against one paper account.
///
/// The first `volatility.seed_days` calendar days are warm-up: they are only
/// visible as history when the observation window is seeded. Every later date
/// is a market tick for the volatility engine; Mondays are scheduled ticks for
/// the rotation engine. `seed_days = 0` starts cold.
pub fn run(config: &Config, dataset: Dataset) -> Result<ReplaySummary> {
    let dates: Vec<NaiveDate> = dataset.dates().into_iter().collect();
    let Some(first) = dates.first().copied() else {
        return Ok(ReplaySummary {
            final_equity: config.replay.initial_cash,
            ..ReplaySummary::default()
        });
    };

    let warm_end = first
        .checked_add_signed(Duration::days(config.volatility.seed_days))
        .context("volatility.seed_days runs past the calendar")?;
    let seed_cursor = warm_end.pred_opt().unwrap_or(warm_end);
    let market = Rc::new(RefCell::new(ReplayMarket::new(dataset, seed_cursor)));
    let broker = Rc::new(RefCell::new(PaperBroker::new(config.replay.initial_cash)));

    let mut volatility = VolatilityRegimeEngine::new(
        config.volatility.clone(),
        Rc::clone(&market),
        Rc::clone(&broker),
    )?;
    let mut rotation = MomentumRotationEngine::new(
        &config.rotation,
        Rc::clone(&market),
        Rc::clone(&market),
        Rc::clone(&broker),
        Rc::clone(&broker),
    )?;
    let seeded = volatility
        .seed()
        .context("failed to seed observation window")?;

    let mut summary = ReplaySummary {
        seeded,
        ..ReplaySummary::default()
    };
    for date in dates.into_iter().filter(|d| *d >= warm_end) {
        market.borrow_mut().set_cursor(date);
        let ticks: Vec<Tick> = market
            .borrow()
            .dataset()
            .closes_on(date)
            .into_iter()
            .map(|(symbol, close)| Tick::new(symbol, close, date))
            .collect();
        for tick in &ticks {
            broker.borrow_mut().mark(&tick.symbol, tick.price);
        }

        for tick in &ticks {
            if let Some(signal) = volatility.on_market_tick(&tick.symbol, tick.price)? {
                if signal != RegimeSignal::Hold {
                    summary.regime_signals += 1;
                }
            }
        }

        if date.weekday() == Weekday::Mon {
            match rotation.on_scheduled_tick() {
                Ok(Some(_)) => summary.rotation_cycles += 1,
                Ok(None) => {}
                Err(e) if e.is_retryable() => {
                    tracing::warn!(%date, error = %e, "Rotation cycle skipped");
                    summary.aborted_cycles += 1;
                }
                Err(e) => return Err(e).with_context(|| format!("rotation failed on {date}")),
            }
        }
        summary.days += 1;
    }

    let broker = broker.borrow();
    summary.fills = broker.fills().len();
    summary.final_equity = broker.equity();
    tracing::info!(
        seeded = summary.seeded,
        days = summary.days,
        regime_signals = summary.regime_signals,
        rotation_cycles = summary.rotation_cycles,
        aborted_cycles = summary.aborted_cycles,
        fills = summary.fills,
        final_equity = summary.final_equity,
        "Replay complete"
    );
    Ok(summary)
}
