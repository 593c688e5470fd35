//! The extraction run: prior state in, normalized books and new state out.

#![deny(unsafe_code)]

pub mod error;
pub mod output;
pub mod pipeline;
pub mod prior;
pub mod reconcile;
pub mod state;

pub use error::StateError;
pub use output::write_book_table;
pub use pipeline::{
    DocumentFailure, ExtractionOptions, ExtractionReport, PublisherCounts, RecordFailure,
    extract_documents, load_context, run_extraction,
};
pub use prior::{PriorState, load_prior_state, read_prior_selections};
pub use reconcile::Reconciler;
pub use state::{InMemoryStateRepository, JsonStateRepository, StateRepository};
