//! CSV report adapter.
//!
//! Writes candle series (one file per symbol) and pattern-match reports
//! (one file per batch) as flat tabular records.

use crate::domain::error::CandlescanError;
use crate::domain::grouping::AnchorRule;
use crate::domain::pipeline::{PatternReport, SymbolCandles};
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

pub struct CsvReportAdapter;

fn csv_error(context: &str, e: csv::Error) -> CandlescanError {
    CandlescanError::Data {
        reason: format!("{context}: {e}"),
    }
}

impl CsvReportAdapter {
    fn write_pattern_rows(
        report: &PatternReport,
        wtr: &mut csv::Writer<fs::File>,
        context: &str,
    ) -> Result<(), CandlescanError> {
        match report {
            PatternReport::Doji(rows) => {
                wtr.write_record([
                    "SYMBOL",
                    "DATE",
                    "OPEN",
                    "HIGH",
                    "LOW",
                    "CLOSE",
                    "UPPER_WICK_%",
                    "BODY_%",
                    "LOWER_WICK_%",
                ])
                .map_err(|e| csv_error(context, e))?;
                for row in rows {
                    wtr.write_record([
                        row.symbol.clone(),
                        row.date.to_string(),
                        row.open.to_string(),
                        row.high.to_string(),
                        row.low.to_string(),
                        row.close.to_string(),
                        format!("{:.2}", row.upper_wick_pct),
                        format!("{:.2}", row.body_pct),
                        format!("{:.2}", row.lower_wick_pct),
                    ])
                    .map_err(|e| csv_error(context, e))?;
                }
            }
            PatternReport::Engulfing(rows) => {
                wtr.write_record(["SYMBOL", "DATE", "TYPE", "OPEN", "HIGH", "LOW", "CLOSE"])
                    .map_err(|e| csv_error(context, e))?;
                for row in rows {
                    wtr.write_record([
                        row.symbol.clone(),
                        row.date.to_string(),
                        row.kind.to_string(),
                        row.open.to_string(),
                        row.high.to_string(),
                        row.low.to_string(),
                        row.close.to_string(),
                    ])
                    .map_err(|e| csv_error(context, e))?;
                }
            }
            PatternReport::Star(rows) => {
                wtr.write_record([
                    "SYMBOL", "DATE", "PATTERN", "C1_DATE", "C2_DATE", "C3_DATE",
                ])
                .map_err(|e| csv_error(context, e))?;
                for row in rows {
                    wtr.write_record([
                        row.symbol.clone(),
                        row.date.to_string(),
                        row.kind.to_string(),
                        row.c1_date.to_string(),
                        row.c2_date.to_string(),
                        row.c3_date.to_string(),
                    ])
                    .map_err(|e| csv_error(context, e))?;
                }
            }
            PatternReport::Run(rows) => {
                let vol_cols = rows.iter().map(|r| r.volumes.len()).max().unwrap_or(0);

                let mut header = vec!["SYMBOL".to_string(), "DATE".to_string()];
                for i in 1..=vol_cols {
                    header.push(format!("VOL_D{i}"));
                }
                header.push(if vol_cols > 0 {
                    format!("CLOSE_D{vol_cols}")
                } else {
                    "CLOSE".to_string()
                });
                wtr.write_record(&header).map_err(|e| csv_error(context, e))?;

                for row in rows {
                    let mut record = vec![row.symbol.clone(), row.date.to_string()];
                    for i in 0..vol_cols {
                        record.push(
                            row.volumes
                                .get(i)
                                .map(|v| v.to_string())
                                .unwrap_or_default(),
                        );
                    }
                    record.push(row.close.to_string());
                    wtr.write_record(&record).map_err(|e| csv_error(context, e))?;
                }
            }
        }
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_candles(
        &self,
        candles: &[SymbolCandles],
        rule: AnchorRule,
        output_dir: &Path,
    ) -> Result<(), CandlescanError> {
        fs::create_dir_all(output_dir)?;

        let (start_col, end_col) = match rule {
            AnchorRule::Weekly => ("Week_Start", "Week_End"),
            AnchorRule::Monthly => ("Month_Start", "Month_End"),
        };

        for symbol_candles in candles {
            let path = output_dir.join(format!("{}.csv", symbol_candles.symbol));
            let context = format!("failed to write {}", path.display());
            let mut wtr = csv::Writer::from_path(&path).map_err(|e| csv_error(&context, e))?;

            wtr.write_record([start_col, end_col, "Open", "High", "Low", "Close"])
                .map_err(|e| csv_error(&context, e))?;
            for candle in &symbol_candles.candles {
                wtr.write_record([
                    candle.period_start.to_string(),
                    candle.period_end.to_string(),
                    candle.open.to_string(),
                    candle.high.to_string(),
                    candle.low.to_string(),
                    candle.close.to_string(),
                ])
                .map_err(|e| csv_error(&context, e))?;
            }
            wtr.flush()?;
        }

        Ok(())
    }

    fn write_patterns(
        &self,
        report: &PatternReport,
        output_path: &Path,
    ) -> Result<(), CandlescanError> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let context = format!("failed to write {}", output_path.display());
        let mut wtr = csv::Writer::from_path(output_path).map_err(|e| csv_error(&context, e))?;
        Self::write_pattern_rows(report, &mut wtr, &context)?;
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pattern::{
        DojiMatch, EngulfingKind, EngulfingMatch, RunMatch, StarKind, StarMatch,
    };
    use crate::domain::resample::Candle;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn candle_files_use_rule_specific_headers() {
        let dir = TempDir::new().unwrap();
        let candles = vec![SymbolCandles {
            symbol: "INFY".into(),
            candles: vec![Candle {
                period_start: date(4),
                period_end: date(10),
                open: 100.0,
                high: 110.0,
                low: 95.0,
                close: 105.5,
            }],
        }];

        let adapter = CsvReportAdapter;
        adapter
            .write_candles(&candles, AnchorRule::Weekly, dir.path())
            .unwrap();
        let weekly = fs::read_to_string(dir.path().join("INFY.csv")).unwrap();
        assert!(weekly.starts_with("Week_Start,Week_End,Open,High,Low,Close\n"));
        assert!(weekly.contains("2024-06-04,2024-06-10,100,110,95,105.5"));

        adapter
            .write_candles(&candles, AnchorRule::Monthly, dir.path())
            .unwrap();
        let monthly = fs::read_to_string(dir.path().join("INFY.csv")).unwrap();
        assert!(monthly.starts_with("Month_Start,Month_End,Open,High,Low,Close\n"));
    }

    #[test]
    fn doji_report_schema() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doji.csv");
        let report = PatternReport::Doji(vec![DojiMatch {
            symbol: "INFY".into(),
            date: date(14),
            open: 100.0,
            high: 110.0,
            low: 99.0,
            close: 100.05,
            upper_wick_pct: 90.45,
            body_pct: 0.45,
            lower_wick_pct: 9.09,
        }]);

        CsvReportAdapter.write_patterns(&report, &out).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert!(content
            .starts_with("SYMBOL,DATE,OPEN,HIGH,LOW,CLOSE,UPPER_WICK_%,BODY_%,LOWER_WICK_%\n"));
        assert!(content.contains("INFY,2024-06-14,100,110,99,100.05,90.45,0.45,9.09"));
    }

    #[test]
    fn engulfing_and_star_report_schemas() {
        let dir = TempDir::new().unwrap();

        let engulfing = PatternReport::Engulfing(vec![EngulfingMatch {
            symbol: "TCS".into(),
            date: date(14),
            kind: EngulfingKind::Bullish,
            open: 95.0,
            high: 116.0,
            low: 94.0,
            close: 115.0,
        }]);
        let out = dir.path().join("engulfing.csv");
        CsvReportAdapter.write_patterns(&engulfing, &out).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("SYMBOL,DATE,TYPE,OPEN,HIGH,LOW,CLOSE\n"));
        assert!(content.contains("TCS,2024-06-14,BULLISH,95,116,94,115"));

        let star = PatternReport::Star(vec![StarMatch {
            symbol: "TCS".into(),
            date: date(14),
            kind: StarKind::Morning,
            c1_date: date(12),
            c2_date: date(13),
            c3_date: date(14),
        }]);
        let out = dir.path().join("star.csv");
        CsvReportAdapter.write_patterns(&star, &out).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("SYMBOL,DATE,PATTERN,C1_DATE,C2_DATE,C3_DATE\n"));
        assert!(content.contains("TCS,2024-06-14,MORNING_STAR,2024-06-12,2024-06-13,2024-06-14"));
    }

    #[test]
    fn run_report_with_volumes() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("run.csv");
        let report = PatternReport::Run(vec![RunMatch {
            symbol: "INFY".into(),
            date: date(14),
            volumes: vec![100, 200, 300, 400],
            close: 13.0,
        }]);

        CsvReportAdapter.write_patterns(&report, &out).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("SYMBOL,DATE,VOL_D1,VOL_D2,VOL_D3,VOL_D4,CLOSE_D4\n"));
        assert!(content.contains("INFY,2024-06-14,100,200,300,400,13"));
    }

    #[test]
    fn run_report_without_volumes() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("run.csv");
        let report = PatternReport::Run(vec![RunMatch {
            symbol: "INFY".into(),
            date: date(14),
            volumes: vec![],
            close: 13.0,
        }]);

        CsvReportAdapter.write_patterns(&report, &out).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("SYMBOL,DATE,CLOSE\n"));
        assert!(content.contains("INFY,2024-06-14,13"));
    }
}
