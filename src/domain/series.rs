//! Per-symbol bar series with normalized date order.

use crate::domain::bar::DailyBar;
use chrono::NaiveDate;

/// A symbol's daily bars, sorted by date with duplicates removed.
///
/// All core components (grouping, aggregation, pattern scanning) consume a
/// prepared series and may assume strictly increasing dates.
#[derive(Debug, Clone)]
pub struct SymbolSeries {
    pub symbol: String,
    pub bars: Vec<DailyBar>,
}

impl SymbolSeries {
    /// Sort bars by date and drop duplicate dates, keeping the first
    /// occurrence of each.
    pub fn from_bars(symbol: impl Into<String>, mut bars: Vec<DailyBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.bars.first(), self.bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// The trailing `window` bars, or `None` when the series is shorter.
    pub fn trailing(&self, window: usize) -> Option<&[DailyBar]> {
        if window == 0 || self.bars.len() < window {
            return None;
        }
        Some(&self.bars[self.bars.len() - window..])
    }

    /// True when every bar carries a volume value.
    pub fn has_volume(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|b| b.volume.is_some())
    }
}
