use std::collections::BTreeMap;

use anyhow::{bail, Result};

use crate::ports::{OrderExecution, PortfolioAccounting};

#[derive(Debug, Clone, PartialEq)]
pub struct PaperFill {
    pub instrument: String,
    pub qty: f64,
    pub price: f64,
}

/// Frictionless cash account with whole-unit positions, marked at replay closes.
#[derive(Debug, Clone)]
pub struct PaperBroker {
    cash: f64,
    positions: BTreeMap<String, f64>,
    marks: BTreeMap<String, f64>,
    fills: Vec<PaperFill>,
}

impl PaperBroker {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            positions: BTreeMap::new(),
            marks: BTreeMap::new(),
            fills: Vec::new(),
        }
    }

    pub fn mark(&mut self, instrument: &str, price: f64) {
        self.marks.insert(instrument.to_string(), price);
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self, instrument: &str) -> f64 {
        self.positions.get(instrument).copied().unwrap_or(0.0)
    }

    pub fn fills(&self) -> &[PaperFill] {
        &self.fills
    }

    pub fn equity(&self) -> f64 {
        self.cash
            + self
                .positions
                .iter()
                .map(|(sym, qty)| qty * self.marks.get(sym).copied().unwrap_or(0.0))
                .sum::<f64>()
    }

    fn price(&self, instrument: &str) -> Result<f64> {
        match self.marks.get(instrument) {
            Some(p) if *p > 0.0 => Ok(*p),
            _ => bail!("no mark price for {}", instrument),
        }
    }

    fn fill(&mut self, instrument: &str, qty: f64) -> Result<()> {
        if qty == 0.0 {
            return Ok(());
        }
        let price = self.price(instrument)?;
        self.cash -= qty * price;
        let pos = self.positions.entry(instrument.to_string()).or_insert(0.0);
        *pos += qty;
        if *pos == 0.0 {
            self.positions.remove(instrument);
        }
        tracing::debug!(instrument, qty, price, cash = self.cash, "Paper fill");
        self.fills.push(PaperFill {
            instrument: instrument.to_string(),
            qty,
            price,
        });
        Ok(())
    }
}

impl PortfolioAccounting for PaperBroker {
    fn invested(&self, instrument: &str) -> Result<bool> {
        Ok(self.position(instrument) != 0.0)
    }

    fn compute_order_quantity(&self, instrument: &str, fraction_of_equity: f64) -> Result<f64> {
        let price = self.price(instrument)?;
        let target_value = self.equity() * fraction_of_equity;
        let held_value = self.position(instrument) * price;
        Ok(((target_value - held_value) / price).trunc())
    }
}

impl OrderExecution for PaperBroker {
    fn liquidate(&mut self, instrument: &str) -> Result<()> {
        let qty = self.position(instrument);
        self.fill(instrument, -qty)
    }

    fn market_order(&mut self, instrument: &str, quantity: f64) -> Result<()> {
        self.fill(instrument, quantity)
    }

    fn set_holdings(&mut self, instrument: &str, weight: f64, liquidate_existing: bool) -> Result<()> {
        if liquidate_existing {
            let others: Vec<String> = self
                .positions
                .keys()
                .filter(|s| s.as_str() != instrument)
                .cloned()
                .collect();
            for sym in others {
                self.liquidate(&sym)?;
            }
        }
        let qty = self.compute_order_quantity(instrument, weight)?;
        self.fill(instrument, qty)
    }
}
