//! Rendering of downloaded tables
//!
//! Writers take the Result Mapping and render it to any `io::Write` sink:
//! a one-line-per-index summary, JSON, or concatenated CSV.

use crate::IndexTables;
use std::io::Write;

pub mod csv;

pub use self::csv::write_csv;

/// Output writer errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV write error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Write one line per index: key, row count and covered dates
///
/// ```
/// use index_history_downloader::{IndexTables, PriceTable};
/// use index_history_downloader::output::write_summary;
///
/// let mut tables = IndexTables::new();
/// tables.insert(
///     "dji".to_string(),
///     PriceTable::new(
///         vec!["Date".to_string(), "Close".to_string()],
///         vec![vec!["2020-01-02".to_string(), "1.0".to_string()]],
///     ),
/// );
///
/// let mut out = Vec::new();
/// write_summary(&tables, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "dji: 1 rows (2020-01-02 .. 2020-01-02)\n");
/// ```
pub fn write_summary<W: Write>(tables: &IndexTables, mut out: W) -> OutputResult<()> {
    for (key, table) in tables {
        let dates = table.column("Date").unwrap_or_default();
        let span = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => format!(" ({first} .. {last})"),
            _ => String::new(),
        };

        writeln!(out, "{}: {} rows{}", key, table.len(), span)
            .map_err(|e| OutputError::IoError(format!("Failed to write summary: {e}")))?;
    }

    out.flush()
        .map_err(|e| OutputError::IoError(format!("Failed to flush output: {e}")))
}

/// Write the whole mapping as pretty-printed JSON
pub fn write_json<W: Write>(tables: &IndexTables, mut out: W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut out, tables)
        .map_err(|e| OutputError::SerializationError(format!("Failed to serialize tables: {e}")))?;

    writeln!(out).map_err(|e| OutputError::IoError(format!("Failed to write output: {e}")))
}
