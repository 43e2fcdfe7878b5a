//! Report output port trait.

use crate::domain::error::CandlescanError;
use crate::domain::grouping::AnchorRule;
use crate::domain::pipeline::{PatternReport, SymbolCandles};
use std::path::Path;

/// Port for writing candle and pattern-match reports.
pub trait ReportPort {
    /// One file per symbol under `output_dir`, schema depending on `rule`
    /// (weekly vs monthly column names).
    fn write_candles(
        &self,
        candles: &[SymbolCandles],
        rule: AnchorRule,
        output_dir: &Path,
    ) -> Result<(), CandlescanError>;

    /// One tabular file for the whole batch.
    fn write_patterns(
        &self,
        report: &PatternReport,
        output_path: &Path,
    ) -> Result<(), CandlescanError>;
}
