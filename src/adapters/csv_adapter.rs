//! CSV file data adapter.
//!
//! Reads one `<SYMBOL>.csv` per symbol from a base directory. Headers are
//! normalized at this boundary (trim, uppercase, `*` stripped) so the core
//! only ever sees the canonical field set.

use crate::domain::bar::DailyBar;
use crate::domain::error::CandlescanError;
use crate::domain::series::SymbolSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

/// Uniform date-parsing policy for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// `%Y-%m-%d` only; the first bad value fails the symbol.
    Strict,
    /// Try the fallback formats; still-unparseable rows are dropped with a
    /// warning.
    Tolerant,
}

const STRICT_FORMAT: &str = "%Y-%m-%d";
const TOLERANT_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%b-%Y"];

fn normalize_header(raw: &str) -> String {
    raw.trim().to_uppercase().replace('*', "")
}

fn parse_date(value: &str, mode: DateMode) -> Option<NaiveDate> {
    match mode {
        DateMode::Strict => NaiveDate::parse_from_str(value, STRICT_FORMAT).ok(),
        DateMode::Tolerant => TOLERANT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok()),
    }
}

#[derive(Debug)]
pub struct CsvBarAdapter {
    base_path: PathBuf,
    date_mode: DateMode,
}

struct ColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
    expiry: Option<usize>,
}

impl CsvBarAdapter {
    pub fn new(base_path: PathBuf, date_mode: DateMode) -> Self {
        Self {
            base_path,
            date_mode,
        }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn map_columns(symbol: &str, headers: &csv::StringRecord) -> Result<ColumnMap, CandlescanError> {
        let canonical: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |name: &str| canonical.iter().position(|h| h == name);

        match (
            find("DATE"),
            find("OPEN"),
            find("HIGH"),
            find("LOW"),
            find("CLOSE"),
        ) {
            (Some(date), Some(open), Some(high), Some(low), Some(close)) => Ok(ColumnMap {
                date,
                open,
                high,
                low,
                close,
                volume: find("VOLUME"),
                expiry: find("EXPIRY"),
            }),
            _ => {
                let missing: Vec<&str> = ["DATE", "OPEN", "HIGH", "LOW", "CLOSE"]
                    .into_iter()
                    .filter(|&name| find(name).is_none())
                    .collect();
                Err(CandlescanError::Schema {
                    symbol: symbol.to_string(),
                    missing: missing.join(", "),
                })
            }
        }
    }

    fn parse_price(
        symbol: &str,
        record: &csv::StringRecord,
        index: usize,
        field: &str,
    ) -> Result<f64, CandlescanError> {
        record
            .get(index)
            .ok_or_else(|| CandlescanError::Data {
                reason: format!("{symbol}: missing {field} value"),
            })?
            .trim()
            .parse()
            .map_err(|e| CandlescanError::Data {
                reason: format!("{symbol}: invalid {field} value: {e}"),
            })
    }
}

impl DataPort for CsvBarAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<SymbolSeries, CandlescanError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| CandlescanError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| CandlescanError::Data {
            reason: format!("{symbol}: CSV header error: {e}"),
        })?;
        let columns = Self::map_columns(symbol, headers)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| CandlescanError::Data {
                reason: format!("{symbol}: CSV parse error: {e}"),
            })?;

            let date_str = record
                .get(columns.date)
                .ok_or_else(|| CandlescanError::Data {
                    reason: format!("{symbol}: missing DATE value"),
                })?
                .trim();

            let date = match parse_date(date_str, self.date_mode) {
                Some(d) => d,
                None => match self.date_mode {
                    DateMode::Strict => {
                        return Err(CandlescanError::DateParse {
                            symbol: symbol.to_string(),
                            value: date_str.to_string(),
                        });
                    }
                    DateMode::Tolerant => {
                        eprintln!("warning: {symbol}: dropping row with bad date {date_str:?}");
                        continue;
                    }
                },
            };

            let volume = match columns.volume {
                Some(i) => {
                    let raw = record.get(i).unwrap_or("").trim();
                    if raw.is_empty() {
                        None
                    } else {
                        Some(raw.parse().map_err(|e| CandlescanError::Data {
                            reason: format!("{symbol}: invalid VOLUME value: {e}"),
                        })?)
                    }
                }
                None => None,
            };

            let expiry = columns
                .expiry
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .and_then(|raw| parse_date(raw, self.date_mode));

            bars.push(DailyBar {
                date,
                open: Self::parse_price(symbol, &record, columns.open, "OPEN")?,
                high: Self::parse_price(symbol, &record, columns.high, "HIGH")?,
                low: Self::parse_price(symbol, &record, columns.low, "LOW")?,
                close: Self::parse_price(symbol, &record, columns.close, "CLOSE")?,
                volume,
                expiry,
            });
        }

        Ok(SymbolSeries::from_bars(symbol, bars))
    }

    fn list_symbols(&self) -> Result<Vec<String>, CandlescanError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| CandlescanError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CandlescanError::Data {
                reason: format!("directory entry error: {e}"),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
