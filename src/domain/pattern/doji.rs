//! Gravestone doji: small body, negligible lower wick, long upper wick.

use crate::domain::bar::DailyBar;
use crate::domain::pattern::{DojiConfig, DojiMatch};

/// Bars required in the window.
pub const WINDOW: usize = 1;

fn pct_of_range(part: f64, range: f64) -> f64 {
    (part / range * 100.0 * 100.0).round() / 100.0
}

/// Classify a single bar. Returns the match with wick/body percentages of
/// range (two decimals), or `None`.
pub fn scan(symbol: &str, bar: &DailyBar, config: &DojiConfig) -> Option<DojiMatch> {
    if bar.is_degenerate() {
        return None;
    }

    let range = bar.range();
    let body = bar.body();
    let upper_wick = bar.upper_wick();
    let lower_wick = bar.lower_wick();

    let qualifies = body <= config.body_max * range
        && lower_wick <= config.lower_wick_max * range
        && upper_wick >= config.upper_wick_min * range;
    if !qualifies {
        return None;
    }

    Some(DojiMatch {
        symbol: symbol.to_string(),
        date: bar.date,
        open: bar.open,
        high: bar.high,
        low: bar.low,
        close: bar.close,
        upper_wick_pct: pct_of_range(upper_wick, range),
        body_pct: pct_of_range(body, range),
        lower_wick_pct: pct_of_range(lower_wick, range),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_bar(open: f64, high: f64, low: f64, close: f64) -> DailyBar {
        DailyBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            open,
            high,
            low,
            close,
            volume: None,
            expiry: None,
        }
    }

    #[test]
    fn classic_gravestone_shape_matches() {
        // range=11, body=0.05 (0.45%), lower wick=1 (9.09%), upper wick=9.95 (90.45%)
        let bar = make_bar(100.0, 110.0, 99.0, 100.05);
        let m = scan("INFY", &bar, &DojiConfig::default()).unwrap();

        assert_eq!(m.symbol, "INFY");
        assert_relative_eq!(m.upper_wick_pct, 90.45, epsilon = 1e-9);
        assert_relative_eq!(m.body_pct, 0.45, epsilon = 1e-9);
        assert_relative_eq!(m.lower_wick_pct, 9.09, epsilon = 1e-9);
    }

    #[test]
    fn long_lower_wick_disqualifies() {
        // Lower wick is 30% of range.
        let bar = make_bar(103.5, 110.0, 100.0, 103.0);
        assert!(scan("INFY", &bar, &DojiConfig::default()).is_none());
    }

    #[test]
    fn large_body_disqualifies() {
        let bar = make_bar(100.0, 110.0, 99.5, 106.0);
        assert!(scan("INFY", &bar, &DojiConfig::default()).is_none());
    }

    #[test]
    fn short_upper_wick_disqualifies() {
        let bar = make_bar(100.0, 101.0, 95.0, 100.2);
        assert!(scan("INFY", &bar, &DojiConfig::default()).is_none());
    }

    #[test]
    fn degenerate_bar_is_skipped() {
        let bar = make_bar(100.0, 100.0, 100.0, 100.0);
        assert!(scan("INFY", &bar, &DojiConfig::default()).is_none());
    }

    #[test]
    fn thresholds_come_from_config() {
        let bar = make_bar(100.0, 110.0, 99.0, 100.05);
        let strict = DojiConfig {
            body_max: 0.2,
            lower_wick_max: 0.05,
            upper_wick_min: 0.6,
        };
        // Lower wick is 9.09% of range, above the tightened 5% cap.
        assert!(scan("INFY", &bar, &strict).is_none());
    }
}
