//! Classification-code lookup.

use std::collections::HashMap;
use std::path::Path;

use onix_model::{CategoryMatch, ClassificationRow, HeaderIndex};

use crate::csv_utils::{cell, read_sheet};
use crate::error::{Result, StandardsError};

/// Separator between levels of a category path.
const PATH_SEPARATOR: &str = "/ ";
/// Separator used when rejoining secondary levels.
const SECONDARY_JOIN: &str = " / ";

const CODE_COLUMNS: [&str; 2] = ["BISAC Code", "Code"];
const CATEGORY_COLUMN: &str = "Category";
const CUSTOM_COLUMN: &str = "Custom Category";

/// In-memory index from classification code to categories.
///
/// Codes are matched case-insensitively; when the sheet lists a code more
/// than once the first row wins.
#[derive(Debug, Clone, Default)]
pub struct ClassificationTable {
    by_code: HashMap<String, CategoryMatch>,
    rows: usize,
}

impl ClassificationTable {
    pub fn new(rows: impl IntoIterator<Item = ClassificationRow>) -> Self {
        let mut by_code = HashMap::new();
        let mut count = 0usize;
        for row in rows {
            count += 1;
            by_code
                .entry(row.code.to_lowercase())
                .or_insert_with(|| category_match(&row));
        }
        Self {
            by_code,
            rows: count,
        }
    }

    /// Number of rows the table was built from.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Categories for `code`; all fields are empty when the code is unknown.
    pub fn lookup(&self, code: &str) -> CategoryMatch {
        self.by_code
            .get(&code.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

fn category_match(row: &ClassificationRow) -> CategoryMatch {
    let (primary, secondary) = split_category_path(&row.category_path);
    CategoryMatch {
        primary,
        secondary,
        custom_tag: row
            .custom_category
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Split a category path into its first level and the remaining levels.
///
/// `"FICTION / Mystery & Detective / General"` gives
/// `("FICTION", "Mystery & Detective / General")`. Every segment is trimmed
/// before rejoining, so the space left in front of each `"/ "` separator
/// never doubles up in the secondary levels.
pub fn split_category_path(path: &str) -> (String, String) {
    let mut segments = path.trim().split(PATH_SEPARATOR).map(str::trim);
    let primary = segments.next().unwrap_or_default().to_string();
    let secondary = segments.collect::<Vec<_>>().join(SECONDARY_JOIN);
    (primary, secondary)
}

/// Load the classification sheet from a CSV export.
///
/// The sheet needs a code column (`BISAC  Code`, or `Code`) and a
/// `Category` column; `Custom Category` is optional. Rows without a code
/// are skipped.
pub fn load_classification_table(path: &Path) -> Result<ClassificationTable> {
    let sheet = read_sheet(path)?;
    let headers = HeaderIndex::new(&sheet.headers);

    let code_idx = CODE_COLUMNS
        .iter()
        .find_map(|name| headers.get(name))
        .ok_or_else(|| StandardsError::MissingColumn {
            column: CODE_COLUMNS[0].to_string(),
            path: path.to_path_buf(),
        })?;
    let category_idx =
        headers
            .get(CATEGORY_COLUMN)
            .ok_or_else(|| StandardsError::MissingColumn {
                column: CATEGORY_COLUMN.to_string(),
                path: path.to_path_buf(),
            })?;
    let custom_idx = headers.get(CUSTOM_COLUMN);

    let mut rows = Vec::with_capacity(sheet.rows.len());
    for row in &sheet.rows {
        let code = cell(row, code_idx);
        if code.is_empty() {
            continue;
        }
        let custom = custom_idx
            .map(|idx| cell(row, idx))
            .filter(|value| !value.is_empty())
            .map(String::from);
        rows.push(ClassificationRow {
            code: code.to_string(),
            category_path: cell(row, category_idx).to_string(),
            custom_category: custom,
        });
    }

    tracing::debug!(
        path = %path.display(),
        row_count = rows.len(),
        "loaded classification sheet"
    );
    Ok(ClassificationTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, path: &str, custom: Option<&str>) -> ClassificationRow {
        ClassificationRow {
            code: code.to_string(),
            category_path: path.to_string(),
            custom_category: custom.map(String::from),
        }
    }

    #[test]
    fn splits_primary_and_secondary() {
        assert_eq!(
            split_category_path("FICTION / Mystery & Detective / General"),
            (
                "FICTION".to_string(),
                "Mystery & Detective / General".to_string()
            )
        );
        assert_eq!(
            split_category_path(" HISTORY / General "),
            ("HISTORY".to_string(), "General".to_string())
        );
        assert_eq!(
            split_category_path("POETRY"),
            ("POETRY".to_string(), String::new())
        );
    }

    #[test]
    fn secondary_levels_are_rejoined_without_doubled_spaces() {
        let (primary, secondary) = split_category_path("A / B / C");
        assert_eq!(primary, "A");
        assert_eq!(secondary, "B / C");
        assert!(!secondary.contains("  "));

        let (_, secondary) = split_category_path("A /  B  / C ");
        assert_eq!(secondary, "B / C");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = ClassificationTable::new(vec![row(
            "FIC000000",
            "FICTION / General",
            Some("Novels"),
        )]);
        let upper = table.lookup("FIC000000");
        let lower = table.lookup("fic000000");
        assert_eq!(upper, lower);
        assert_eq!(upper.primary, "FICTION");
        assert_eq!(upper.secondary, "General");
        assert_eq!(upper.custom_tag, "Novels");
    }

    #[test]
    fn unknown_code_yields_empty_match() {
        let table = ClassificationTable::new(vec![row("FIC000000", "FICTION / General", None)]);
        let result = table.lookup("HIS000000");
        assert!(result.is_empty());
        assert_eq!(table.lookup("").primary, "");
    }

    #[test]
    fn first_row_wins_for_duplicate_codes() {
        let table = ClassificationTable::new(vec![
            row("FIC000000", "FICTION / General", None),
            row("fic000000", "OTHER / Thing", Some("Dup")),
        ]);
        assert_eq!(table.len(), 2);
        let result = table.lookup("FIC000000");
        assert_eq!(result.primary, "FICTION");
        assert_eq!(result.custom_tag, "");
    }
}
