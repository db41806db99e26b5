/// Per-cycle view of one rotation candidate. Rebuilt on every eligible tick.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentQuote {
    pub id: String,
    pub current_price: f64,
    /// First available close at or after the start of the lookback horizon.
    pub lookback_price: Option<f64>,
    pub invested: bool,
}

impl InstrumentQuote {
    pub fn new(
        id: impl Into<String>,
        current_price: f64,
        lookback_price: Option<f64>,
        invested: bool,
    ) -> Self {
        Self {
            id: id.into(),
            current_price,
            lookback_price,
            invested,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRatio {
    pub instrument_id: String,
    pub ratio: f64,
}
