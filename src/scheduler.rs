use crate::error::{EngineError, EngineResult};

/// Lets only every `every_n`th scheduled tick through. The counter never resets.
#[derive(Debug, Clone)]
pub struct SchedulerGate {
    every_n: u64,
    tick_count: u64,
}

impl SchedulerGate {
    pub fn new(every_n: u64) -> EngineResult<Self> {
        if every_n == 0 {
            return Err(EngineError::Config(
                "scheduler multiple must be > 0".to_string(),
            ));
        }
        Ok(Self {
            every_n,
            tick_count: 0,
        })
    }

    /// Record one scheduled tick and report whether it is eligible.
    pub fn should_run(&mut self) -> bool {
        let eligible = self.tick_count % self.every_n == 0;
        self.tick_count = self.tick_count.saturating_add(1);
        eligible
    }

    /// Number of scheduled ticks seen so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn every_n(&self) -> u64 {
        self.every_n
    }
}
