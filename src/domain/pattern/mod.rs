//! Candlestick pattern scanners.
//!
//! One submodule per pattern. Every scanner is a pure function of its
//! trailing window: no history is retained between calls, and any window
//! containing a degenerate bar (`range <= 0`) is skipped. All numeric
//! thresholds arrive through [`PatternConfig`]; nothing is a module
//! constant.

pub mod doji;
pub mod engulfing;
pub mod run;
pub mod star;

use chrono::NaiveDate;
use std::fmt;

/// Gravestone doji thresholds, all as fractions of the bar's range.
#[derive(Debug, Clone, Copy)]
pub struct DojiConfig {
    pub body_max: f64,
    pub lower_wick_max: f64,
    pub upper_wick_min: f64,
}

impl Default for DojiConfig {
    fn default() -> Self {
        Self {
            body_max: 0.2,
            lower_wick_max: 0.2,
            upper_wick_min: 0.6,
        }
    }
}

/// Morning/evening star body thresholds, as fractions of each bar's range.
#[derive(Debug, Clone, Copy)]
pub struct StarConfig {
    pub strong_body_min: f64,
    pub small_body_max: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            strong_body_min: 0.6,
            small_body_max: 0.3,
        }
    }
}

/// Directional-run length and volume confirmation filters. The two filters
/// are independent and composable; either, both, or neither may be set.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub length: usize,
    pub volume_last_max: bool,
    pub volume_increasing: bool,
}

impl RunConfig {
    pub fn needs_volume(&self) -> bool {
        self.volume_last_max || self.volume_increasing
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            length: 4,
            volume_last_max: false,
            volume_increasing: false,
        }
    }
}

/// All scanner thresholds, passed by value into each scan call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternConfig {
    pub doji: DojiConfig,
    pub star: StarConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone)]
pub struct DojiMatch {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub upper_wick_pct: f64,
    pub body_pct: f64,
    pub lower_wick_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EngulfingKind {
    Bullish,
    Bearish,
}

impl fmt::Display for EngulfingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngulfingKind::Bullish => write!(f, "BULLISH"),
            EngulfingKind::Bearish => write!(f, "BEARISH"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngulfingMatch {
    pub symbol: String,
    pub date: NaiveDate,
    pub kind: EngulfingKind,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StarKind {
    Morning,
    Evening,
}

impl fmt::Display for StarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarKind::Morning => write!(f, "MORNING_STAR"),
            StarKind::Evening => write!(f, "EVENING_STAR"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StarMatch {
    pub symbol: String,
    pub date: NaiveDate,
    pub kind: StarKind,
    pub c1_date: NaiveDate,
    pub c2_date: NaiveDate,
    pub c3_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct RunMatch {
    pub symbol: String,
    pub date: NaiveDate,
    /// Window volumes in date order; empty when the series carries none and
    /// no volume filter is active.
    pub volumes: Vec<i64>,
    pub close: f64,
}
