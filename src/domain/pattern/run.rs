//! N-bar all-green directional run with optional volume confirmation.

use crate::domain::bar::DailyBar;
use crate::domain::pattern::{RunConfig, RunMatch};

fn last_is_max(volumes: &[i64]) -> bool {
    match volumes.split_last() {
        Some((last, rest)) => rest.iter().all(|v| v <= last),
        None => false,
    }
}

fn strictly_increasing(volumes: &[i64]) -> bool {
    volumes.windows(2).all(|pair| pair[0] < pair[1])
}

/// Classify a window of exactly `config.length` bars. Every bar must close
/// above its open; the configured volume filters are applied on top.
///
/// Callers must only pass windows with volume present when a volume filter
/// is active (the orchestrator validates this as a schema error).
pub fn scan(symbol: &str, window: &[DailyBar], config: &RunConfig) -> Option<RunMatch> {
    if config.length == 0 || window.len() != config.length {
        return None;
    }
    if window.iter().any(|bar| bar.is_degenerate()) {
        return None;
    }
    if !window.iter().all(|bar| bar.is_green()) {
        return None;
    }

    let volumes: Vec<i64> = window.iter().filter_map(|bar| bar.volume).collect();

    if config.needs_volume() {
        if volumes.len() != window.len() {
            return None;
        }
        if config.volume_last_max && !last_is_max(&volumes) {
            return None;
        }
        if config.volume_increasing && !strictly_increasing(&volumes) {
            return None;
        }
    }

    let last = window.last()?;
    Some(RunMatch {
        symbol: symbol.to_string(),
        date: last.date,
        volumes,
        close: last.close,
    })
}
