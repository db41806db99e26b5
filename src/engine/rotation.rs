use chrono::Duration;

use crate::config::RotationConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::decision::{ReallocationAction, ReallocationDecision};
use crate::model::instrument::InstrumentQuote;
use crate::ports::{HistoryProvider, MarketDataFeed, OrderExecution, PortfolioAccounting};
use crate::scheduler::SchedulerGate;
use crate::strategy::momentum_rank::MomentumRanker;
use crate::strategy::reallocation::ReallocationPolicy;

/// Schedule driven strategy: every Nth tick, rotate into the instrument with the
/// best return over the lookback horizon, or exit to cash when nothing clears
/// the participation threshold.
pub struct MomentumRotationEngine<F, H, P, E>
where
    F: MarketDataFeed,
    H: HistoryProvider,
    P: PortfolioAccounting,
    E: OrderExecution,
{
    universe: Vec<String>,
    lookback: Duration,
    gate: SchedulerGate,
    ranker: MomentumRanker,
    policy: ReallocationPolicy,
    feed: F,
    history: H,
    portfolio: P,
    execution: E,
}

impl<F, H, P, E> MomentumRotationEngine<F, H, P, E>
where
    F: MarketDataFeed,
    H: HistoryProvider,
    P: PortfolioAccounting,
    E: OrderExecution,
{
    pub fn new(
        cfg: &RotationConfig,
        feed: F,
        history: H,
        portfolio: P,
        execution: E,
    ) -> EngineResult<Self> {
        cfg.validate()?;
        Ok(Self {
            universe: cfg.universe.clone(),
            lookback: Duration::days(cfg.lookback_days),
            gate: SchedulerGate::new(cfg.every_n_ticks)?,
            ranker: MomentumRanker,
            policy: ReallocationPolicy::new(
                cfg.participation_threshold,
                cfg.target_allocation_fraction,
            )?,
            feed,
            history,
            portfolio,
            execution,
        })
    }

    /// Handle one scheduled tick. `Ok(None)` on gated ticks; otherwise the
    /// decision that was applied (possibly empty when already positioned).
    pub fn on_scheduled_tick(&mut self) -> EngineResult<Option<ReallocationDecision>> {
        if !self.gate.should_run() {
            tracing::debug!(tick = self.gate.tick_count(), "Rotation tick gated");
            return Ok(None);
        }

        let decision = match self.evaluate() {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "Rotation cycle aborted; holdings unchanged");
                return Err(e);
            }
        };
        self.apply(&decision)?;
        Ok(Some(decision))
    }

    /// Gather quotes, rank and decide without touching any position.
    pub fn evaluate(&self) -> EngineResult<ReallocationDecision> {
        let quotes = self.collect_quotes()?;
        let ranking = self.ranker.rank(&quotes)?;
        let invested: Vec<bool> = quotes.iter().map(|q| q.invested).collect();

        let best = ranking.best_ratio();
        tracing::info!(
            leader = %best.instrument_id,
            ratio = best.ratio,
            threshold = self.policy.participation_threshold(),
            order = ?ranking.ordered_ids(),
            "Momentum ranking"
        );
        Ok(self.policy.decide(&ranking, &invested))
    }

    fn collect_quotes(&self) -> EngineResult<Vec<InstrumentQuote>> {
        let mut quotes = Vec::with_capacity(self.universe.len());
        for id in &self.universe {
            let current = self
                .feed
                .latest_price(id)?
                .ok_or_else(|| EngineError::data_unavailable(id, "no current price"))?;
            let closes = self.history.history(id, self.lookback)?;
            let Some(lookback_price) = closes.first().copied() else {
                return Err(EngineError::data_unavailable(id, "empty lookback history"));
            };
            let invested = self.portfolio.invested(id)?;
            quotes.push(InstrumentQuote::new(
                id,
                current,
                Some(lookback_price),
                invested,
            ));
        }
        Ok(quotes)
    }

    fn apply(&mut self, decision: &ReallocationDecision) -> EngineResult<()> {
        for instruction in &decision.instructions {
            let id = instruction.instrument_id.as_str();
            match instruction.action {
                ReallocationAction::Liquidate => {
                    tracing::info!(decision_id = %decision.decision_id, instrument = id, "Liquidating");
                    self.execution.liquidate(id)?;
                }
                ReallocationAction::Buy { fraction_of_equity } => {
                    let qty = self
                        .portfolio
                        .compute_order_quantity(id, fraction_of_equity)?;
                    if qty == 0.0 {
                        tracing::warn!(
                            decision_id = %decision.decision_id,
                            instrument = id,
                            fraction_of_equity,
                            "Order quantity is zero; skipping buy"
                        );
                        continue;
                    }
                    tracing::info!(
                        decision_id = %decision.decision_id,
                        instrument = id,
                        qty,
                        fraction_of_equity,
                        "Submitting rotation buy"
                    );
                    self.execution.market_order(id, qty)?;
                }
            }
        }
        Ok(())
    }

    pub fn gate(&self) -> &SchedulerGate {
        &self.gate
    }

    pub fn execution(&self) -> &E {
        &self.execution
    }
}
