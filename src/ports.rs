//! Collaborators the engines call out to. The core never does I/O itself;
//! adapters implementing these traits own data access and order routing.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use chrono::Duration;

pub trait MarketDataFeed {
    /// Latest known price, `None` if the instrument has not printed yet.
    fn latest_price(&self, instrument: &str) -> Result<Option<f64>>;
}

pub trait HistoryProvider {
    /// Closes covering the trailing `horizon`, oldest first.
    fn history(&self, instrument: &str, horizon: Duration) -> Result<Vec<f64>>;
}

pub trait PortfolioAccounting {
    fn invested(&self, instrument: &str) -> Result<bool>;
    /// Signed quantity that moves the holding to `fraction_of_equity` of total equity.
    fn compute_order_quantity(&self, instrument: &str, fraction_of_equity: f64) -> Result<f64>;
}

pub trait OrderExecution {
    fn liquidate(&mut self, instrument: &str) -> Result<()>;
    fn market_order(&mut self, instrument: &str, quantity: f64) -> Result<()>;
    fn set_holdings(&mut self, instrument: &str, weight: f64, liquidate_existing: bool)
        -> Result<()>;
}

// Both engines run on one thread and may share a single adapter.

impl<T: MarketDataFeed> MarketDataFeed for Rc<RefCell<T>> {
    fn latest_price(&self, instrument: &str) -> Result<Option<f64>> {
        self.borrow().latest_price(instrument)
    }
}

impl<T: HistoryProvider> HistoryProvider for Rc<RefCell<T>> {
    fn history(&self, instrument: &str, horizon: Duration) -> Result<Vec<f64>> {
        self.borrow().history(instrument, horizon)
    }
}

impl<T: PortfolioAccounting> PortfolioAccounting for Rc<RefCell<T>> {
    fn invested(&self, instrument: &str) -> Result<bool> {
        self.borrow().invested(instrument)
    }

    fn compute_order_quantity(&self, instrument: &str, fraction_of_equity: f64) -> Result<f64> {
        self.borrow()
            .compute_order_quantity(instrument, fraction_of_equity)
    }
}

impl<T: OrderExecution> OrderExecution for Rc<RefCell<T>> {
    fn liquidate(&mut self, instrument: &str) -> Result<()> {
        self.borrow_mut().liquidate(instrument)
    }

    fn market_order(&mut self, instrument: &str, quantity: f64) -> Result<()> {
        self.borrow_mut().market_order(instrument, quantity)
    }

    fn set_holdings(
        &mut self,
        instrument: &str,
        weight: f64,
        liquidate_existing: bool,
    ) -> Result<()> {
        self.borrow_mut()
            .set_holdings(instrument, weight, liquidate_existing)
    }
}
