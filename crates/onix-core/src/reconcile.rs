//! Carrying user selections forward and rebuilding the run state.

use onix_ingest::RawProductRecord;
use onix_model::{NormalizedBook, PersistedBookState, PersistedState};

use crate::prior::PriorState;

/// Merges freshly extracted books with the previous run.
///
/// The state built here replaces the stored state wholesale: ISBNs that
/// are not merged during this run are dropped.
#[derive(Debug)]
pub struct Reconciler<'a> {
    prior: &'a PriorState,
    state: PersistedState,
}

impl<'a> Reconciler<'a> {
    pub fn new(prior: &'a PriorState) -> Self {
        Self {
            prior,
            state: PersistedState::new(),
        }
    }

    /// Apply the prior selection to `book` and record where it came from.
    pub fn merge(&mut self, mut book: NormalizedBook, record: &RawProductRecord) -> NormalizedBook {
        book.selected = self.prior.is_selected(&book.isbn);

        if let Some(previous) = self.prior.persisted.get(&book.isbn)
            && previous.origin_file_path != record.origin_file_path
        {
            tracing::debug!(
                isbn = %book.isbn,
                from = %previous.origin_file_path,
                to = %record.origin_file_path,
                "book moved to a different source file"
            );
        }

        let entry = PersistedBookState {
            origin_file_path: record.origin_file_path.clone(),
            origin_file_name: record.origin_file_name.clone(),
            detected_version: record.release.major(),
            selected: book.selected,
        };
        if self.state.insert(book.isbn.clone(), entry).is_some() {
            tracing::debug!(isbn = %book.isbn, "duplicate ISBN, keeping the later record");
        }
        book
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn into_state(self) -> PersistedState {
        self.state
    }
}
