//! The book table handed to users.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use onix_model::{NormalizedBook, OUTPUT_COLUMNS};

use crate::error::StateError;

/// Write books as CSV with the fixed column header.
///
/// The header is written even when there are no books, so the selection
/// column is always present for the user to fill in.
pub fn write_book_table(path: &Path, books: &[NormalizedBook]) -> Result<(), StateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StateError::io(parent, e))?;
    }
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StateError::csv(path, &e))?;

    writer
        .write_record(OUTPUT_COLUMNS)
        .map_err(|e| StateError::csv(path, &e))?;
    for book in books {
        writer
            .serialize(book)
            .map_err(|e| StateError::csv(path, &e))?;
    }
    writer.flush().map_err(|e| StateError::io(path, e))?;

    tracing::info!(path = %path.display(), rows = books.len(), "wrote book table");
    Ok(())
}
