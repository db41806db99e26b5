use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub date: NaiveDate,
}

impl Tick {
    pub fn new(symbol: impl Into<String>, price: f64, date: NaiveDate) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            date,
        }
    }
}
