use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::ports::{HistoryProvider, MarketDataFeed};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Daily closes per symbol, loaded from `{"series": {"SYM": [{"date", "close"}]}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    pub series: BTreeMap<String, Vec<DailyBar>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&payload)
            .with_context(|| format!("invalid dataset in {}", path.display()))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let mut dataset: Dataset =
            serde_json::from_str(s).context("failed to parse dataset json")?;
        for (symbol, bars) in dataset.series.iter_mut() {
            bars.sort_by_key(|b| b.date);
            if let Some(w) = bars.windows(2).find(|w| w[0].date == w[1].date) {
                bail!("{} has two bars on {}", symbol, w[0].date);
            }
        }
        Ok(dataset)
    }

    /// Every date that has at least one bar, ascending.
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.series
            .values()
            .flat_map(|bars| bars.iter().map(|b| b.date))
            .collect()
    }

    pub fn close_on(&self, symbol: &str, date: NaiveDate) -> Option<f64> {
        let bars = self.series.get(symbol)?;
        bars.binary_search_by_key(&date, |b| b.date)
            .ok()
            .map(|i| bars[i].close)
    }

    pub fn closes_on(&self, date: NaiveDate) -> Vec<(&str, f64)> {
        self.series
            .keys()
            .filter_map(|s| self.close_on(s, date).map(|c| (s.as_str(), c)))
            .collect()
    }
}

/// Serves the dataset as if "now" were `cursor`; nothing after the cursor is visible.
#[derive(Debug, Clone)]
pub struct ReplayMarket {
    dataset: Dataset,
    cursor: NaiveDate,
}

impl ReplayMarket {
    pub fn new(dataset: Dataset, cursor: NaiveDate) -> Self {
        Self { dataset, cursor }
    }

    pub fn set_cursor(&mut self, cursor: NaiveDate) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn visible(&self, instrument: &str) -> &[DailyBar] {
        let Some(bars) = self.dataset.series.get(instrument) else {
            return &[];
        };
        let end = bars.partition_point(|b| b.date <= self.cursor);
        &bars[..end]
    }
}

impl MarketDataFeed for ReplayMarket {
    fn latest_price(&self, instrument: &str) -> Result<Option<f64>> {
        Ok(self.visible(instrument).last().map(|b| b.close))
    }
}

impl HistoryProvider for ReplayMarket {
    fn history(&self, instrument: &str, horizon: Duration) -> Result<Vec<f64>> {
        let start = self.cursor - horizon;
        Ok(self
            .visible(instrument)
            .iter()
            .filter(|b| b.date >= start)
            .map(|b| b.close)
            .collect())
    }
}
