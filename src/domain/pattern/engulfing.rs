//! Two-bar engulfing reversal: color flip with full body containment.

use crate::domain::bar::DailyBar;
use crate::domain::pattern::{EngulfingKind, EngulfingMatch};

/// Bars required in the window.
pub const WINDOW: usize = 2;

/// Classify the `prev`/`curr` pair. The current bar's body interval must
/// contain the previous bar's body interval with the opposite color.
pub fn scan(symbol: &str, prev: &DailyBar, curr: &DailyBar) -> Option<EngulfingMatch> {
    if prev.is_degenerate() || curr.is_degenerate() {
        return None;
    }

    let (prev_body_low, prev_body_high) = prev.body_interval();
    let (curr_body_low, curr_body_high) = curr.body_interval();
    let contains = curr_body_low <= prev_body_low && curr_body_high >= prev_body_high;
    if !contains {
        return None;
    }

    let kind = if prev.is_red() && curr.is_green() {
        EngulfingKind::Bullish
    } else if prev.is_green() && curr.is_red() {
        EngulfingKind::Bearish
    } else {
        return None;
    };

    Some(EngulfingMatch {
        symbol: symbol.to_string(),
        date: curr.date,
        kind,
        open: curr.open,
        high: curr.high,
        low: curr.low,
        close: curr.close,
    })
}
