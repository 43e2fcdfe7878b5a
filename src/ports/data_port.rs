//! Bar data access port trait.

use crate::domain::error::CandlescanError;
use crate::domain::series::SymbolSeries;

pub trait DataPort {
    /// Load one symbol's daily bars as a prepared (sorted, de-duplicated)
    /// series.
    fn fetch_series(&self, symbol: &str) -> Result<SymbolSeries, CandlescanError>;

    /// All symbols the source knows about, sorted.
    fn list_symbols(&self) -> Result<Vec<String>, CandlescanError>;
}
