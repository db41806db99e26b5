use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReallocationAction {
    Liquidate,
    Buy { fraction_of_equity: f64 },
}

impl fmt::Display for ReallocationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquidate => f.write_str("LIQUIDATE"),
            Self::Buy { fraction_of_equity } => write!(f, "BUY({fraction_of_equity})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReallocationInstruction {
    pub instrument_id: String,
    pub action: ReallocationAction,
}

/// Ordered instructions for one rotation cycle: liquidations always precede the buy.
#[derive(Debug, Clone, PartialEq)]
pub struct ReallocationDecision {
    pub decision_id: String,
    /// Instrument the cycle rotated into, `None` when exiting to cash.
    pub target: Option<String>,
    pub instructions: Vec<ReallocationInstruction>,
}

impl ReallocationDecision {
    pub fn new(target: Option<String>) -> Self {
        Self {
            decision_id: format!("dec-{}", &uuid::Uuid::new_v4().to_string()[..8]),
            target,
            instructions: Vec::new(),
        }
    }

    pub fn push(&mut self, instrument_id: impl Into<String>, action: ReallocationAction) {
        self.instructions.push(ReallocationInstruction {
            instrument_id: instrument_id.into(),
            action,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn liquidations(&self) -> impl Iterator<Item = &str> {
        self.instructions
            .iter()
            .filter(|i| i.action == ReallocationAction::Liquidate)
            .map(|i| i.instrument_id.as_str())
    }

    pub fn buys(&self) -> impl Iterator<Item = (&str, f64)> {
        self.instructions.iter().filter_map(|i| match i.action {
            ReallocationAction::Buy { fraction_of_equity } => {
                Some((i.instrument_id.as_str(), fraction_of_equity))
            }
            ReallocationAction::Liquidate => None,
        })
    }
}
