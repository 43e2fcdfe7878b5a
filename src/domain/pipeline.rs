//! Batch orchestration over per-symbol series.
//!
//! Each symbol is processed independently; a symbol that fails validation is
//! recorded with its reason and never aborts the batch. Reports are sorted
//! deterministically before they are returned, never by completion order.

use crate::domain::grouping::GroupConfig;
use crate::domain::pattern::{
    doji, engulfing, run, star, DojiMatch, EngulfingMatch, PatternConfig, RunMatch, StarMatch,
};
use crate::domain::resample::{build_candles, Candle};
use crate::domain::series::SymbolSeries;
use std::fmt;

/// Which pattern scan to run over the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    GravestoneDoji,
    Engulfing,
    Star,
    GreenRun,
}

impl ScanKind {
    /// Minimum series length required for one evaluation.
    pub fn min_window(&self, config: &PatternConfig) -> usize {
        match self {
            ScanKind::GravestoneDoji => doji::WINDOW,
            ScanKind::Engulfing => engulfing::WINDOW,
            ScanKind::Star => star::WINDOW,
            ScanKind::GreenRun => config.run.length,
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanKind::GravestoneDoji => write!(f, "gravestone-doji"),
            ScanKind::Engulfing => write!(f, "engulfing"),
            ScanKind::Star => write!(f, "star"),
            ScanKind::GreenRun => write!(f, "green-run"),
        }
    }
}

/// Matches for one scan kind, deterministically ordered.
#[derive(Debug, Clone)]
pub enum PatternReport {
    Doji(Vec<DojiMatch>),
    Engulfing(Vec<EngulfingMatch>),
    Star(Vec<StarMatch>),
    Run(Vec<RunMatch>),
}

impl PatternReport {
    pub fn len(&self) -> usize {
        match self {
            PatternReport::Doji(rows) => rows.len(),
            PatternReport::Engulfing(rows) => rows.len(),
            PatternReport::Star(rows) => rows.len(),
            PatternReport::Run(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sort(&mut self) {
        match self {
            // Strongest rejection first, symbol as tie-break.
            PatternReport::Doji(rows) => rows.sort_by(|a, b| {
                b.upper_wick_pct
                    .total_cmp(&a.upper_wick_pct)
                    .then_with(|| a.symbol.cmp(&b.symbol))
            }),
            PatternReport::Engulfing(rows) => {
                rows.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.symbol.cmp(&b.symbol)))
            }
            PatternReport::Star(rows) => {
                rows.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.symbol.cmp(&b.symbol)))
            }
            PatternReport::Run(rows) => rows.sort_by(|a, b| a.symbol.cmp(&b.symbol)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub enum SkipReason {
    MissingFields { missing: String },
    InsufficientBars { bars: usize, minimum: usize },
    LoadFailed { reason: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFields { missing } => write!(f, "missing field(s): {missing}"),
            SkipReason::InsufficientBars { bars, minimum } => {
                write!(f, "only {bars} bars, minimum {minimum} required")
            }
            SkipReason::LoadFailed { reason } => write!(f, "load failed: {reason}"),
        }
    }
}

pub struct ScanOutcome {
    pub report: PatternReport,
    pub skipped: Vec<SkippedSymbol>,
}

/// Run one pattern scan across the batch, evaluating each symbol's trailing
/// window only.
pub fn run_scan(
    series_list: &[SymbolSeries],
    kind: ScanKind,
    config: &PatternConfig,
) -> ScanOutcome {
    let minimum = kind.min_window(config);
    let mut skipped = Vec::new();

    let mut doji_rows = Vec::new();
    let mut engulfing_rows = Vec::new();
    let mut star_rows = Vec::new();
    let mut run_rows = Vec::new();

    for series in series_list {
        if series.len() < minimum {
            eprintln!(
                "warning: skipping {} (only {} bars, minimum {} required)",
                series.symbol,
                series.len(),
                minimum
            );
            skipped.push(SkippedSymbol {
                symbol: series.symbol.clone(),
                reason: SkipReason::InsufficientBars {
                    bars: series.len(),
                    minimum,
                },
            });
            continue;
        }

        if kind == ScanKind::GreenRun && config.run.needs_volume() && !series.has_volume() {
            eprintln!(
                "warning: skipping {} (volume filter requested, VOLUME absent)",
                series.symbol
            );
            skipped.push(SkippedSymbol {
                symbol: series.symbol.clone(),
                reason: SkipReason::MissingFields {
                    missing: "VOLUME".into(),
                },
            });
            continue;
        }

        let window = match series.trailing(minimum) {
            Some(w) => w,
            None => continue,
        };

        match kind {
            ScanKind::GravestoneDoji => {
                if let Some(m) = doji::scan(&series.symbol, &window[0], &config.doji) {
                    doji_rows.push(m);
                }
            }
            ScanKind::Engulfing => {
                if let Some(m) = engulfing::scan(&series.symbol, &window[0], &window[1]) {
                    engulfing_rows.push(m);
                }
            }
            ScanKind::Star => {
                if let Some(m) =
                    star::scan(&series.symbol, &window[0], &window[1], &window[2], &config.star)
                {
                    star_rows.push(m);
                }
            }
            ScanKind::GreenRun => {
                if let Some(m) = run::scan(&series.symbol, window, &config.run) {
                    run_rows.push(m);
                }
            }
        }
    }

    let mut report = match kind {
        ScanKind::GravestoneDoji => PatternReport::Doji(doji_rows),
        ScanKind::Engulfing => PatternReport::Engulfing(engulfing_rows),
        ScanKind::Star => PatternReport::Star(star_rows),
        ScanKind::GreenRun => PatternReport::Run(run_rows),
    };
    report.sort();

    ScanOutcome { report, skipped }
}

#[derive(Debug, Clone)]
pub struct SymbolCandles {
    pub symbol: String,
    pub candles: Vec<Candle>,
}

pub struct CandleBuildOutcome {
    pub candles: Vec<SymbolCandles>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Build period candles for every symbol in the batch, in symbol order.
pub fn build_all_candles(
    series_list: &[SymbolSeries],
    config: &GroupConfig,
    include_leading: bool,
) -> CandleBuildOutcome {
    let mut candles = Vec::new();
    let mut skipped = Vec::new();

    for series in series_list {
        if series.is_empty() {
            eprintln!("warning: skipping {} (no bars)", series.symbol);
            skipped.push(SkippedSymbol {
                symbol: series.symbol.clone(),
                reason: SkipReason::InsufficientBars {
                    bars: 0,
                    minimum: 1,
                },
            });
            continue;
        }

        match build_candles(series, config, include_leading) {
            Ok(rows) => candles.push(SymbolCandles {
                symbol: series.symbol.clone(),
                candles: rows,
            }),
            Err(e) => {
                eprintln!("warning: skipping {} ({})", series.symbol, e);
                skipped.push(SkippedSymbol {
                    symbol: series.symbol.clone(),
                    reason: SkipReason::LoadFailed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    candles.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    CandleBuildOutcome { candles, skipped }
}
