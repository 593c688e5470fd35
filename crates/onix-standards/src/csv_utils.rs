//! Shared CSV reading for the lookup sheets.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// A sheet read from CSV: the header row and the remaining rows.
#[derive(Debug, Clone, Default)]
pub(crate) struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a CSV sheet, consuming the first row as header.
///
/// Rows may have differing lengths. Rows whose cells are all blank are
/// dropped. Cells keep their inner text; only a leading byte-order mark is
/// removed from the header.
pub(crate) fn read_sheet(path: &Path) -> Result<Sheet> {
    let file = File::open(path).map_err(|e| StandardsError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(path, &e))?
        .iter()
        .map(|value| value.trim_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| StandardsError::csv(path, &e))?;
        let row: Vec<String> = record.iter().map(String::from).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(Sheet { headers, rows })
}

/// Cell at `idx`, trimmed, or empty when the row is short.
pub(crate) fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).map_or("", str::trim)
}
