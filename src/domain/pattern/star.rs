//! Three-bar morning/evening star reversal: strong, small, strong-opposite
//! with the third close crossing the first body's midpoint.

use crate::domain::bar::DailyBar;
use crate::domain::pattern::{StarConfig, StarKind, StarMatch};

/// Bars required in the window.
pub const WINDOW: usize = 3;

/// Classify the `c1`/`c2`/`c3` triple.
pub fn scan(
    symbol: &str,
    c1: &DailyBar,
    c2: &DailyBar,
    c3: &DailyBar,
    config: &StarConfig,
) -> Option<StarMatch> {
    if c1.is_degenerate() || c2.is_degenerate() || c3.is_degenerate() {
        return None;
    }

    let c1_strong = c1.body() >= config.strong_body_min * c1.range();
    let c2_small = c2.body() <= config.small_body_max * c2.range();
    let c3_strong = c3.body() >= config.strong_body_min * c3.range();
    if !(c1_strong && c2_small && c3_strong) {
        return None;
    }

    let c1_midpoint = (c1.open + c1.close) / 2.0;
    let kind = if c1.is_red() && c3.is_green() && c3.close >= c1_midpoint {
        StarKind::Morning
    } else if c1.is_green() && c3.is_red() && c3.close <= c1_midpoint {
        StarKind::Evening
    } else {
        return None;
    };

    Some(StarMatch {
        symbol: symbol.to_string(),
        date: c3.date,
        kind,
        c1_date: c1.date,
        c2_date: c2.date,
        c3_date: c3.date,
    })
}
