use std::fmt;

/// Regime derived from where the newest observation sits in its trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegimeSignal {
    ShortBias,
    LongBias,
    ExitLong,
    Hold,
}

impl RegimeSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortBias => "regime.short_bias",
            Self::LongBias => "regime.long_bias",
            Self::ExitLong => "regime.exit_long",
            Self::Hold => "regime.hold",
        }
    }

    pub fn is_actionable(self) -> bool {
        self != Self::Hold
    }
}

impl fmt::Display for RegimeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
