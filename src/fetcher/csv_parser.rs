//! CSV response parser
//!
//! Stateless conversion of a response body into a [`PriceTable`]. The body is
//! read straight from memory; nothing is staged on disk.

use crate::fetcher::{FetcherError, FetcherResult};
use crate::PriceTable;
use csv::ReaderBuilder;
use tracing::debug;

/// Stateless parser for comma-separated price history
pub struct CsvTableParser;

impl CsvTableParser {
    /// Parse a header row plus data rows
    ///
    /// An empty body, or a body holding only a header row, yields a table with
    /// zero rows. Blank lines are skipped. Header names and cells are kept
    /// byte-for-byte, including surrounding whitespace.
    ///
    /// # Errors
    /// Returns FetcherError::ParseError if a row's field count differs from
    /// the header's or the body is not valid UTF-8
    pub fn parse(body: &[u8]) -> FetcherResult<PriceTable> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(body);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| FetcherError::ParseError(format!("Failed to read header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                FetcherError::ParseError(format!("Failed to read data row {}: {e}", line + 1))
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!("Parsed {} columns and {} rows", columns.len(), rows.len());

        Ok(PriceTable::new(columns, rows))
    }
}
