use crate::error::{EngineError, EngineResult};
use crate::model::decision::{ReallocationAction, ReallocationDecision};
use crate::strategy::momentum_rank::MomentumRanking;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReallocationPolicy {
    participation_threshold: f64,
    target_allocation_fraction: f64,
}

impl ReallocationPolicy {
    pub fn new(participation_threshold: f64, target_allocation_fraction: f64) -> EngineResult<Self> {
        if !participation_threshold.is_finite() || participation_threshold <= 0.0 {
            return Err(EngineError::Config(format!(
                "participation_threshold must be finite and > 0, got {participation_threshold}"
            )));
        }
        if !(target_allocation_fraction > 0.0 && target_allocation_fraction <= 1.0) {
            return Err(EngineError::Config(format!(
                "target_allocation_fraction must be in (0, 1], got {target_allocation_fraction}"
            )));
        }
        Ok(Self {
            participation_threshold,
            target_allocation_fraction,
        })
    }

    pub fn participation_threshold(&self) -> f64 {
        self.participation_threshold
    }

    pub fn target_allocation_fraction(&self) -> f64 {
        self.target_allocation_fraction
    }

    /// Turn a ranking plus holdings into at most one liquidation and at most one buy.
    ///
    /// `invested` is indexed like `ranking.ratios()`. Liquidation always picks the
    /// first invested instrument in ranking input order, never a full sweep.
    pub fn decide(&self, ranking: &MomentumRanking, invested: &[bool]) -> ReallocationDecision {
        debug_assert_eq!(ranking.len(), invested.len());
        let ratios = ranking.ratios();
        let held = |i: usize| invested.get(i).copied().unwrap_or(false);

        if ranking.best_ratio().ratio < self.participation_threshold {
            let mut decision = ReallocationDecision::new(None);
            if let Some(i) = (0..ratios.len()).find(|&i| held(i)) {
                decision.push(&ratios[i].instrument_id, ReallocationAction::Liquidate);
            }
            return decision;
        }

        let target = ranking.best();
        let target_id = &ratios[target].instrument_id;
        let mut decision = ReallocationDecision::new(Some(target_id.clone()));
        if let Some(i) = (0..ratios.len()).find(|&i| i != target && held(i)) {
            decision.push(&ratios[i].instrument_id, ReallocationAction::Liquidate);
        }
        if !held(target) {
            decision.push(
                target_id,
                ReallocationAction::Buy {
                    fraction_of_equity: self.target_allocation_fraction,
                },
            );
        }
        decision
    }
}
