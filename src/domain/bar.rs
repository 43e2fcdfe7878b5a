//! Daily OHLC bar representation and candle geometry.

use chrono::NaiveDate;

/// One trading day for one symbol. `volume` and `expiry` are optional
/// pass-through fields; the core only requires OHLC.
#[derive(Debug, Clone)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<i64>,
    pub expiry: Option<NaiveDate>,
}

impl DailyBar {
    /// high - low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// |close - open|
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// high - max(open, close)
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// min(open, close) - low
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_green(&self) -> bool {
        self.close > self.open
    }

    pub fn is_red(&self) -> bool {
        self.close < self.open
    }

    /// A bar with no range carries no geometry; pattern scanners skip any
    /// window containing one. Aggregation still consumes it.
    pub fn is_degenerate(&self) -> bool {
        self.range() <= 0.0
    }

    /// Lower and upper bound of the candle body, in price order.
    pub fn body_interval(&self) -> (f64, f64) {
        (self.open.min(self.close), self.open.max(self.close))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 99.0,
            close: 100.05,
            volume: Some(50_000),
            expiry: None,
        }
    }

    #[test]
    fn geometry_of_gravestone_shape() {
        let bar = sample_bar();
        assert!((bar.range() - 11.0).abs() < f64::EPSILON);
        assert!((bar.body() - 0.05).abs() < 1e-9);
        assert!((bar.upper_wick() - 9.95).abs() < 1e-9);
        assert!((bar.lower_wick() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn color_predicates() {
        let bar = sample_bar();
        assert!(bar.is_green());
        assert!(!bar.is_red());

        let mut flat = bar.clone();
        flat.close = flat.open;
        assert!(!flat.is_green());
        assert!(!flat.is_red());
    }

    #[test]
    fn degenerate_when_high_equals_low() {
        let bar = DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 100.0,
            low: 100.0,
            close: 100.0,
            volume: None,
            expiry: None,
        };
        assert!(bar.is_degenerate());
        assert!(!sample_bar().is_degenerate());
    }

    #[test]
    fn body_interval_is_ordered() {
        let red = DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 110.0,
            high: 112.0,
            low: 98.0,
            close: 100.0,
            volume: None,
            expiry: None,
        };
        assert_eq!(red.body_interval(), (100.0, 110.0));
        assert_eq!(sample_bar().body_interval(), (100.0, 100.05));
    }
}
