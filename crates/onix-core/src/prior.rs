//! What the previous run left behind.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use onix_model::{HeaderIndex, PersistedState, SELECTION_COLUMN, marker};

use crate::error::StateError;
use crate::state::StateRepository;

const ISBN_COLUMN: &str = "isbn";

/// Persisted state plus the selections read from the previous output table.
#[derive(Debug, Clone, Default)]
pub struct PriorState {
    pub persisted: PersistedState,
    /// ISBNs marked in the previous output; `None` when it could not be read.
    pub selections: Option<HashSet<String>>,
}

impl PriorState {
    /// Whether the user marked `isbn` in the previous output table.
    ///
    /// Without a readable output table nothing counts as selected, whatever
    /// the persisted flags say.
    pub fn is_selected(&self, isbn: &str) -> bool {
        self.selections
            .as_ref()
            .is_some_and(|selected| selected.contains(isbn))
    }
}

/// Load both halves of the prior state.
///
/// Neither source is required: a missing or unreadable file is logged and
/// treated as empty.
pub fn load_prior_state(repository: &dyn StateRepository, prior_output: &Path) -> PriorState {
    let persisted = repository.load().unwrap_or_else(|error| {
        tracing::warn!(%error, "ignoring unreadable state file");
        PersistedState::new()
    });
    let selections = match read_prior_selections(prior_output) {
        Ok(selections) => selections,
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable prior output");
            None
        }
    };

    tracing::info!(
        persisted_entries = persisted.len(),
        prior_selections = ?selections.as_ref().map(HashSet::len),
        "loaded prior state"
    );
    PriorState {
        persisted,
        selections,
    }
}

/// ISBNs whose selection cell is filled in the previous output table.
///
/// Returns `Ok(None)` when the table does not exist.
pub fn read_prior_selections(path: &Path) -> Result<Option<HashSet<String>>, StateError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no prior output");
        return Ok(None);
    }
    let file = File::open(path).map_err(|e| StateError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = HeaderIndex::new(reader.headers().map_err(|e| StateError::csv(path, &e))?);
    let column = |name: &str| {
        headers.get(name).ok_or_else(|| StateError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    };
    let isbn_idx = column(ISBN_COLUMN)?;
    let selection_idx = column(SELECTION_COLUMN)?;

    let mut selected = HashSet::new();
    for record in reader.records() {
        let record = record.map_err(|e| StateError::csv(path, &e))?;
        let isbn = record.get(isbn_idx).map_or("", str::trim);
        let marked = record.get(selection_idx).is_some_and(marker::is_marked);
        if marked && !isbn.is_empty() {
            selected.insert(isbn.to_string());
        }
    }
    Ok(Some(selected))
}
