use crate::error::{EngineError, EngineResult};
use crate::model::instrument::{InstrumentQuote, PerformanceRatio};

/// Only built by [`MomentumRanker::rank`], so `ratios` is never empty and `best`
/// always indexes into it.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumRanking {
    ratios: Vec<PerformanceRatio>,
    best: usize,
}

impl MomentumRanking {
    /// One ratio per input instrument, in input order.
    pub fn ratios(&self) -> &[PerformanceRatio] {
        &self.ratios
    }

    /// Index into [`Self::ratios`] of the leader.
    pub fn best(&self) -> usize {
        self.best
    }

    pub fn best_ratio(&self) -> &PerformanceRatio {
        &self.ratios[self.best]
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Instrument ids ordered by ratio, strongest first; ties keep input order.
    pub fn ordered_ids(&self) -> Vec<&str> {
        let mut idx: Vec<usize> = (0..self.ratios.len()).collect();
        idx.sort_by(|a, b| self.ratios[*b].ratio.total_cmp(&self.ratios[*a].ratio));
        idx.into_iter()
            .map(|i| self.ratios[i].instrument_id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumRanker;

impl MomentumRanker {
    /// Rank by `current_price / lookback_price`.
    ///
    /// The whole batch is rejected if any quote is unusable; a partial ranking is
    /// never returned. When several instruments share the maximum ratio the one
    /// listed first wins.
    pub fn rank(&self, quotes: &[InstrumentQuote]) -> EngineResult<MomentumRanking> {
        if quotes.is_empty() {
            return Err(EngineError::data_unavailable(
                "*",
                "empty instrument batch",
            ));
        }

        let mut ratios = Vec::with_capacity(quotes.len());
        for q in quotes {
            let lookback = match q.lookback_price {
                Some(p) if p.is_finite() && p > 0.0 => p,
                Some(p) => {
                    return Err(EngineError::data_unavailable(
                        &q.id,
                        format!("invalid lookback price {p}"),
                    ))
                }
                None => {
                    return Err(EngineError::data_unavailable(&q.id, "missing lookback price"))
                }
            };
            if !q.current_price.is_finite() || q.current_price <= 0.0 {
                return Err(EngineError::data_unavailable(
                    &q.id,
                    format!("invalid current price {}", q.current_price),
                ));
            }
            ratios.push(PerformanceRatio {
                instrument_id: q.id.clone(),
                ratio: q.current_price / lookback,
            });
        }

        let mut best = 0;
        for (i, r) in ratios.iter().enumerate().skip(1) {
            if r.ratio > ratios[best].ratio {
                best = i;
            }
        }
        Ok(MomentumRanking { ratios, best })
    }
}
