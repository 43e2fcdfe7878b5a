//! Period-group OHLC aggregation into candles.

use crate::domain::bar::DailyBar;
use crate::domain::error::CandlescanError;
use crate::domain::grouping::{period_groups, GroupConfig};
use crate::domain::series::SymbolSeries;
use chrono::NaiveDate;

/// One aggregated candle covering a period group. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Reduce one date-sorted period group into a candle: open of the earliest
/// bar, close of the latest, extreme high/low across the group.
pub fn aggregate_group(bars: &[DailyBar]) -> Result<Candle, CandlescanError> {
    let first = bars.first().ok_or(CandlescanError::EmptyGroup)?;
    let last = bars.last().ok_or(CandlescanError::EmptyGroup)?;

    let mut high = first.high;
    let mut low = first.low;
    for bar in &bars[1..] {
        if bar.high > high {
            high = bar.high;
        }
        if bar.low < low {
            low = bar.low;
        }
    }

    Ok(Candle {
        period_start: first.date,
        period_end: last.date,
        open: first.open,
        high,
        low,
        close: last.close,
    })
}

/// Build one candle per period group of `series`. The incomplete leading
/// group is dropped unless `include_leading` is set.
pub fn build_candles(
    series: &SymbolSeries,
    config: &GroupConfig,
    include_leading: bool,
) -> Result<Vec<Candle>, CandlescanError> {
    let mut candles = Vec::new();
    for group in period_groups(&series.bars, config) {
        if !group.complete && !include_leading {
            continue;
        }
        candles.push(aggregate_group(group.bars)?);
    }
    Ok(candles)
}
