//! Domain error types.

/// Top-level error type for candlescan.
///
/// Symbol-scoped variants (`Schema`, `InsufficientHistory`, `DateParse`,
/// `Data`) are recorded per symbol and never abort a batch; configuration
/// and I/O errors surface at startup and do.
#[derive(Debug, thiserror::Error)]
pub enum CandlescanError {
    #[error("missing required field(s) for {symbol}: {missing}")]
    Schema { symbol: String, missing: String },

    #[error("insufficient history for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("unparseable date for {symbol}: {value:?}")]
    DateParse { symbol: String, value: String },

    #[error("empty period group")]
    EmptyGroup,

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no usable symbols in batch")]
    NoUsableSymbols,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&CandlescanError> for std::process::ExitCode {
    fn from(err: &CandlescanError) -> Self {
        let code: u8 = match err {
            CandlescanError::Io(_) => 1,
            CandlescanError::ConfigParse { .. }
            | CandlescanError::ConfigMissing { .. }
            | CandlescanError::ConfigInvalid { .. } => 2,
            CandlescanError::Schema { .. }
            | CandlescanError::DateParse { .. }
            | CandlescanError::Data { .. }
            | CandlescanError::EmptyGroup => 3,
            CandlescanError::InsufficientHistory { .. }
            | CandlescanError::NoUsableSymbols => 5,
        };
        std::process::ExitCode::from(code)
    }
}
