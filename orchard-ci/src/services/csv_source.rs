//! Delimited-file source adapter
//!
//! Materializes a CSV file into the raw-row sequence the pipeline consumes.
//! The whole file is read before processing begins; duplicate detection
//! needs full visibility into the batch, so this is deliberately not a
//! streaming interface.

use crate::models::{CellValue, RawRow};
use orchard_common::{Error, Result};
use std::path::Path;
use tracing::info;

/// Read a CSV file with a header row into raw rows.
///
/// Empty cells are treated as absent (not inserted into the row). Cells
/// that are purely numeric are kept as numbers, mirroring how spreadsheet
/// exports type their cells; everything else stays text.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_path(path)
        .map_err(|e| Error::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::InvalidInput(format!("Cannot read header row: {}", e)))?
        .clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::InvalidInput(format!(
            "No header row in {}",
            path.display()
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::InvalidInput(format!("Malformed CSV record: {}", e)))?;
        let mut row = RawRow::new();
        for (label, field) in headers.iter().zip(record.iter()) {
            if field.is_empty() {
                continue;
            }
            row.insert(label, parse_cell(field));
        }
        rows.push(row);
    }

    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Purely numeric fields become numbers, everything else stays text.
///
/// Only values that round-trip through the numeric rendering are coerced;
/// "0012" and "1e5" are natural-key material, not numbers, and must not be
/// re-rendered as "12" or "100000".
fn parse_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() && CellValue::Number(n).to_display() == trimmed {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(field.to_string())
}
