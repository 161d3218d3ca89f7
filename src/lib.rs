//! # Index History Downloader Library
//!
//! Fetches historical daily price series for market indices (DJI, N225,
//! BTC-USD, ...) from the Yahoo Finance CSV download endpoint and returns them
//! as tables keyed by a normalized index name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use index_history_downloader::download;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = download("2020-01-01", "2020-12-31", Some(&["DJI", "BTC-USD"][..])).await?;
//!
//! let dji = &tables["dji"];
//! let btc = &tables["btc_usd"];
//! println!("DJI rows: {}, BTC-USD rows: {}", dji.len(), btc.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`index`] - Index identifier validation, key normalization and URL variants
//! - [`fetcher`] - Raw Fetcher: one HTTP GET, body parsed in memory into a [`PriceTable`]
//! - [`downloader`] - Index Downloader (two URL variants with fallback) and
//!   Batch Downloader (fail-fast over a list of indices)
//! - [`output`] - Rendering of downloaded tables (human summary, JSON, CSV)
//!
//! ## Data Types
//!
//! - [`PriceTable`] - Pass-through table exactly as served by the remote source
//! - [`DailyBar`] - Optional typed view of one table row
//! - [`IndexTables`] - Result Mapping from normalized key to table

#![warn(missing_docs)]
#![warn(clippy::all)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// CLI command implementations
pub mod cli;

/// Download orchestration
pub mod downloader;

/// Raw fetchers for the remote endpoint
pub mod fetcher;

/// Index identifier parsing and validation
pub mod index;

/// Rendering of downloaded tables
pub mod output;

pub use downloader::{download, BatchDownloader, DownloadError, IndexDownloader};
pub use index::IndexName;

/// Column set served by the remote source for daily history
pub const EXPECTED_COLUMNS: [&str; 7] = ["Date", "Open", "High", "Low", "Close", "Adj Close", "Volume"];

/// Result Mapping: normalized index key (e.g. `btc_usd`) to its price table
pub type IndexTables = BTreeMap<String, PriceTable>;

/// Tabular price series as returned by the remote source
///
/// The schema is passed through unmodified: column names come from the
/// header row and every cell is kept as its raw text. Use [`PriceTable::bars`]
/// for a typed view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PriceTable {
    /// Create a table from a header row and data rows
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Table with no columns and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows (header excluded)
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// True when every named column is present
    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.column_index(name).is_some())
    }

    /// Convert rows into typed daily bars
    ///
    /// Requires the [`EXPECTED_COLUMNS`] set. Cells reading `null` (the remote
    /// source's placeholder for missing values) or left blank become `None`.
    ///
    /// # Errors
    /// Returns a message naming the offending column and row when a column is
    /// missing or a cell cannot be parsed.
    pub fn bars(&self) -> Result<Vec<DailyBar>, String> {
        let idx = |name: &str| {
            self.column_index(name)
                .ok_or_else(|| format!("Missing column: {name}"))
        };
        let date_idx = idx("Date")?;
        let open_idx = idx("Open")?;
        let high_idx = idx("High")?;
        let low_idx = idx("Low")?;
        let close_idx = idx("Close")?;
        let adj_close_idx = idx("Adj Close")?;
        let volume_idx = idx("Volume")?;

        let mut bars = Vec::with_capacity(self.rows.len());

        for (row_no, row) in self.rows.iter().enumerate() {
            let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

            let date = NaiveDate::parse_from_str(cell(date_idx).trim(), "%Y-%m-%d")
                .map_err(|e| format!("Invalid Date in row {row_no}: {e}"))?;

            bars.push(DailyBar {
                date,
                open: parse_optional(cell(open_idx), "Open", row_no)?,
                high: parse_optional(cell(high_idx), "High", row_no)?,
                low: parse_optional(cell(low_idx), "Low", row_no)?,
                close: parse_optional(cell(close_idx), "Close", row_no)?,
                adj_close: parse_optional(cell(adj_close_idx), "Adj Close", row_no)?,
                volume: parse_optional(cell(volume_idx), "Volume", row_no)?,
            });
        }

        Ok(bars)
    }
}

fn parse_optional<T>(raw: &str, column: &str, row_no: usize) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    raw.parse::<T>()
        .map(Some)
        .map_err(|e| format!("Invalid {column} in row {row_no}: {e}"))
}

/// One trading day of an index price series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBar {
    /// Trading date
    pub date: NaiveDate,
    /// Open price
    pub open: Option<Decimal>,
    /// High price
    pub high: Option<Decimal>,
    /// Low price
    pub low: Option<Decimal>,
    /// Close price
    pub close: Option<Decimal>,
    /// Close adjusted for splits and dividends
    pub adj_close: Option<Decimal>,
    /// Traded volume
    pub volume: Option<u64>,
}

impl DailyBar {
    /// Validate bar data integrity
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(high), Some(low)) = (self.high, self.low) {
            if high < low {
                return Err(format!("High ({high}) must be >= low ({low})"));
            }
        }

        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if let Some(v) = value {
                if v < Decimal::ZERO {
                    return Err(format!("{name} must be non-negative, got {v}"));
                }
            }
        }

        Ok(())
    }
}
