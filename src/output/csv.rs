//! CSV output writer

use crate::IndexTables;
use csv::WriterBuilder;
use std::io::Write;
use tracing::debug;

use super::{OutputError, OutputResult};

/// Marker written before each table so concatenated output can be split again
pub const TABLE_MARKER: &str = "# ";

/// Write every table as CSV, each preceded by a `# <key>` line
///
/// Tables are written with their own header row, exactly as received.
pub fn write_csv<W: Write>(tables: &IndexTables, mut out: W) -> OutputResult<()> {
    for (key, table) in tables {
        writeln!(out, "{TABLE_MARKER}{key}")
            .map_err(|e| OutputError::IoError(format!("Failed to write table marker: {e}")))?;

        // Separate writer per table: column counts may differ between tables
        let mut writer = WriterBuilder::new().from_writer(&mut out);

        writer
            .write_record(table.columns())
            .map_err(|e| OutputError::CsvError(format!("Failed to write header for {key}: {e}")))?;

        for row in table.rows() {
            writer
                .write_record(row)
                .map_err(|e| OutputError::CsvError(format!("Failed to write row for {key}: {e}")))?;
        }

        writer
            .flush()
            .map_err(|e| OutputError::IoError(format!("Failed to flush {key}: {e}")))?;

        debug!("Wrote {} rows for {}", table.len(), key);
    }

    Ok(())
}
