//! CLI definition and dispatch.

use chrono::Weekday;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvBarAdapter, DateMode};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::CandlescanError;
use crate::domain::grouping::{AnchorRule, GroupConfig};
use crate::domain::pattern::{DojiConfig, PatternConfig, RunConfig, StarConfig};
use crate::domain::pipeline::{
    build_all_candles, run_scan, ScanKind, SkipReason, SkippedSymbol,
};
use crate::domain::series::SymbolSeries;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "candlescan",
    about = "Anchored calendar candle builder and candlestick pattern scanner"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build weekly or monthly candles
    Candles {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [candles] rule: weekly or monthly
        #[arg(long)]
        rule: Option<String>,
        /// Comma-separated symbols; defaults to every CSV in the data dir
        #[arg(long)]
        symbols: Option<String>,
        /// Output directory for per-symbol candle files
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also emit the incomplete group before the first anchor
        #[arg(long)]
        include_leading: bool,
    },
    /// Scan trailing windows for a candlestick pattern
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        /// Pattern: doji, engulfing, star, or green-run
        #[arg(long)]
        pattern: String,
        #[arg(long)]
        symbols: Option<String>,
        /// Output CSV path for the match report
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show date range and bar count for one symbol
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Candles {
            config,
            rule,
            symbols,
            output,
            include_leading,
        } => run_candles(
            &config,
            rule.as_deref(),
            symbols.as_deref(),
            output.as_deref(),
            include_leading,
        ),
        Command::Scan {
            config,
            pattern,
            symbols,
            output,
        } => run_pattern_scan(&config, &pattern, symbols.as_deref(), output.as_deref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(&symbol, &config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CandlescanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.trim().to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn parse_anchor_rule(value: &str) -> Option<AnchorRule> {
    match value.trim().to_lowercase().as_str() {
        "weekly" => Some(AnchorRule::Weekly),
        "monthly" => Some(AnchorRule::Monthly),
        _ => None,
    }
}

pub fn parse_scan_kind(value: &str) -> Option<ScanKind> {
    match value.trim().to_lowercase().as_str() {
        "doji" | "gravestone-doji" => Some(ScanKind::GravestoneDoji),
        "engulfing" => Some(ScanKind::Engulfing),
        "star" => Some(ScanKind::Star),
        "green-run" | "run" => Some(ScanKind::GreenRun),
        _ => None,
    }
}

/// Comma-separated symbol list: trimmed, uppercased, empties rejected.
pub fn parse_symbol_list(input: &str) -> Result<Vec<String>, CandlescanError> {
    let mut symbols = Vec::new();
    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(CandlescanError::ConfigInvalid {
                section: "cli".into(),
                key: "symbols".into(),
                reason: "empty token in symbol list".into(),
            });
        }
        symbols.push(trimmed.to_uppercase());
    }
    Ok(symbols)
}

pub fn build_data_adapter(
    adapter: &dyn ConfigPort,
) -> Result<CsvBarAdapter, CandlescanError> {
    let dir = adapter
        .get_string("data", "dir")
        .ok_or_else(|| CandlescanError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;

    let date_mode = match adapter
        .get_string("data", "date_mode")
        .unwrap_or_else(|| "strict".to_string())
        .to_lowercase()
        .as_str()
    {
        "strict" => DateMode::Strict,
        "tolerant" => DateMode::Tolerant,
        other => {
            return Err(CandlescanError::ConfigInvalid {
                section: "data".into(),
                key: "date_mode".into(),
                reason: format!("expected strict or tolerant, got {other:?}"),
            });
        }
    };

    Ok(CsvBarAdapter::new(PathBuf::from(dir), date_mode))
}

pub fn build_group_config(
    adapter: &dyn ConfigPort,
    rule_override: Option<&str>,
) -> Result<GroupConfig, CandlescanError> {
    let weekday_str = adapter
        .get_string("candles", "anchor_weekday")
        .unwrap_or_else(|| "tuesday".to_string());
    let anchor_weekday =
        parse_weekday(&weekday_str).ok_or_else(|| CandlescanError::ConfigInvalid {
            section: "candles".into(),
            key: "anchor_weekday".into(),
            reason: format!("unknown weekday {weekday_str:?}"),
        })?;

    let rule_str = match rule_override {
        Some(r) => r.to_string(),
        None => adapter
            .get_string("candles", "rule")
            .unwrap_or_else(|| "weekly".to_string()),
    };
    let rule = parse_anchor_rule(&rule_str).ok_or_else(|| CandlescanError::ConfigInvalid {
        section: "candles".into(),
        key: "rule".into(),
        reason: format!("expected weekly or monthly, got {rule_str:?}"),
    })?;

    Ok(GroupConfig {
        anchor_weekday,
        rule,
    })
}

pub fn build_pattern_config(adapter: &dyn ConfigPort) -> Result<PatternConfig, CandlescanError> {
    let defaults = PatternConfig::default();

    let run_length = adapter.get_int("run", "length", defaults.run.length as i64);
    if run_length < 1 {
        return Err(CandlescanError::ConfigInvalid {
            section: "run".into(),
            key: "length".into(),
            reason: format!("run length must be at least 1, got {run_length}"),
        });
    }

    Ok(PatternConfig {
        doji: DojiConfig {
            body_max: adapter.get_double("doji", "body_max", defaults.doji.body_max),
            lower_wick_max: adapter.get_double(
                "doji",
                "lower_wick_max",
                defaults.doji.lower_wick_max,
            ),
            upper_wick_min: adapter.get_double(
                "doji",
                "upper_wick_min",
                defaults.doji.upper_wick_min,
            ),
        },
        star: StarConfig {
            strong_body_min: adapter.get_double(
                "star",
                "strong_body_min",
                defaults.star.strong_body_min,
            ),
            small_body_max: adapter.get_double(
                "star",
                "small_body_max",
                defaults.star.small_body_max,
            ),
        },
        run: RunConfig {
            length: run_length as usize,
            volume_last_max: adapter.get_bool("run", "volume_last_max", false),
            volume_increasing: adapter.get_bool("run", "volume_increasing", false),
        },
    })
}

fn resolve_symbols(
    data_port: &dyn DataPort,
    symbols_arg: Option<&str>,
) -> Result<Vec<String>, CandlescanError> {
    match symbols_arg {
        Some(list) => parse_symbol_list(list),
        None => data_port.list_symbols(),
    }
}

/// Load every symbol, converting per-symbol load failures into skip entries
/// so one bad file never aborts the batch.
fn load_series(
    data_port: &dyn DataPort,
    symbols: &[String],
) -> (Vec<SymbolSeries>, Vec<SkippedSymbol>) {
    let mut series_list = Vec::with_capacity(symbols.len());
    let mut skipped = Vec::new();

    for symbol in symbols {
        match data_port.fetch_series(symbol) {
            Ok(series) => series_list.push(series),
            Err(e) => {
                eprintln!("warning: skipping {symbol} ({e})");
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason: SkipReason::LoadFailed {
                        reason: e.to_string(),
                    },
                });
            }
        }
    }

    (series_list, skipped)
}

fn print_skip_summary(skipped: &[SkippedSymbol]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("\nSkipped {} symbol(s):", skipped.len());
    for skip in skipped {
        eprintln!("  {}: {}", skip.symbol, skip.reason);
    }
}

fn run_candles(
    config_path: &Path,
    rule_override: Option<&str>,
    symbols_arg: Option<&str>,
    output: Option<&Path>,
    include_leading: bool,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let group_config = match build_group_config(&adapter, rule_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = match build_data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match resolve_symbols(&data_port, symbols_arg) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Building candles for {} symbol(s)...", symbols.len());

    // CLI flag wins; otherwise the [candles] section decides.
    let include_leading =
        include_leading || adapter.get_bool("candles", "include_leading", false);

    let (series_list, mut skipped) = load_series(&data_port, &symbols);
    let mut outcome = build_all_candles(&series_list, &group_config, include_leading);
    skipped.append(&mut outcome.skipped);

    if outcome.candles.is_empty() {
        let err = CandlescanError::NoUsableSymbols;
        print_skip_summary(&skipped);
        eprintln!("error: {err}");
        return (&err).into();
    }

    let default_dir = PathBuf::from(match group_config.rule {
        AnchorRule::Weekly => "weekly",
        AnchorRule::Monthly => "monthly",
    });
    let output_dir = output.unwrap_or(&default_dir);

    if let Err(e) =
        CsvReportAdapter.write_candles(&outcome.candles, group_config.rule, output_dir)
    {
        eprintln!("error: {e}");
        return (&e).into();
    }

    print_skip_summary(&skipped);
    eprintln!(
        "\nWrote candles for {} symbol(s) to {}",
        outcome.candles.len(),
        output_dir.display()
    );
    ExitCode::SUCCESS
}

fn run_pattern_scan(
    config_path: &Path,
    pattern: &str,
    symbols_arg: Option<&str>,
    output: Option<&Path>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let kind = match parse_scan_kind(pattern) {
        Some(k) => k,
        None => {
            let err = CandlescanError::ConfigInvalid {
                section: "cli".into(),
                key: "pattern".into(),
                reason: format!(
                    "expected doji, engulfing, star, or green-run, got {pattern:?}"
                ),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let pattern_config = match build_pattern_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_port = match build_data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match resolve_symbols(&data_port, symbols_arg) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Scanning {} symbol(s) for {kind}...", symbols.len());

    let (series_list, mut skipped) = load_series(&data_port, &symbols);
    let outcome = run_scan(&series_list, kind, &pattern_config);
    skipped.extend(outcome.skipped);

    let default_path = PathBuf::from(format!("{kind}.csv"));
    let output_path = output.unwrap_or(&default_path);

    if let Err(e) = CsvReportAdapter.write_patterns(&outcome.report, output_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    print_skip_summary(&skipped);
    eprintln!(
        "\n{} match(es) written to {}",
        outcome.report.len(),
        output_path.display()
    );
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let data_port = match build_data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match data_port.list_symbols() {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(symbol: &str, config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let data_port = match build_data_adapter(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let series = match data_port.fetch_series(&symbol.to_uppercase()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match series.date_range() {
        Some((start, end)) => {
            println!("{}: {} bars, {} to {}", series.symbol, series.len(), start, end);
        }
        None => {
            println!("{}: no bars", series.symbol);
        }
    }
    ExitCode::SUCCESS
}
