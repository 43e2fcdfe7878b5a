#![allow(dead_code)]

use candlescan::domain::bar::DailyBar;
use candlescan::domain::error::CandlescanError;
use candlescan::domain::series::SymbolSeries;
use candlescan::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashMap;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(day: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> DailyBar {
    DailyBar {
        date: day,
        open,
        high,
        low,
        close,
        volume: Some(1000),
        expiry: None,
    }
}

/// Green or red bar from open/close alone, with a small wick on each side.
pub fn make_plain_bar(day: NaiveDate, open: f64, close: f64, volume: Option<i64>) -> DailyBar {
    DailyBar {
        date: day,
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume,
        expiry: None,
    }
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<DailyBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<DailyBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, symbol: &str) -> Result<SymbolSeries, CandlescanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CandlescanError::Data {
                reason: reason.clone(),
            });
        }
        Ok(SymbolSeries::from_bars(
            symbol,
            self.data.get(symbol).cloned().unwrap_or_default(),
        ))
    }

    fn list_symbols(&self) -> Result<Vec<String>, CandlescanError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}
