use std::collections::VecDeque;

use crate::error::{EngineError, EngineResult};

/// Fixed-capacity FIFO of recent observations. Oldest value is evicted on overflow.
#[derive(Debug, Clone)]
pub struct RollingObservationWindow {
    capacity: usize,
    values: VecDeque<f64>,
}

impl RollingObservationWindow {
    pub fn new(capacity: usize) -> EngineResult<Self> {
        if capacity == 0 {
            return Err(EngineError::Config(
                "rolling window capacity must be > 0".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        })
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            let _ = self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Push every value in order, e.g. when seeding from history.
    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for v in values {
            self.push(v);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.values.len() == self.capacity
    }

    /// Ordered copy, oldest to newest.
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
