//! The extraction run.
//!
//! Stages, in order:
//! 1. load the lookup sheets and the prior state
//! 2. discover documents and read their products
//! 3. map each product with the adapter for its release
//! 4. reconcile selections and rebuild the state
//! 5. save the state and write the book table
//!
//! Failures below the run level are collected in the report instead of
//! stopping the batch: an unparseable document skips that document, an
//! invalid product skips that product.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use onix_ingest::{SourceDocument, discover_documents, read_products};
use onix_model::{FieldIssue, NormalizedBook, PersistedState};
use onix_standards::{load_classification_table, load_subject_phrases};
use onix_transform::{ExtractionContext, VersionAdapter};

use crate::output::write_book_table;
use crate::prior::{PriorState, load_prior_state};
use crate::reconcile::Reconciler;
use crate::state::StateRepository;

/// Paths and switches for one run.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Directory holding one sub-directory per publisher.
    pub source_dir: PathBuf,
    pub classification_csv: PathBuf,
    pub subject_headings_csv: PathBuf,
    /// Book table; also read as the prior output.
    pub output: PathBuf,
    /// Skip saving state and writing the table.
    pub dry_run: bool,
}

/// A product dropped because required fields were missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub origin_file_path: String,
    pub isbn: Option<String>,
    pub issues: Vec<FieldIssue>,
}

/// A document skipped because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Per publisher directory tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublisherCounts {
    pub documents: usize,
    pub failed_documents: usize,
    pub products: usize,
    pub extracted: usize,
    pub invalid: usize,
    pub unsupported: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Books in discovery order, duplicates included.
    pub books: Vec<NormalizedBook>,
    /// Rebuilt state, as saved.
    pub state: PersistedState,
    pub record_failures: Vec<RecordFailure>,
    pub document_failures: Vec<DocumentFailure>,
    pub unsupported: usize,
    pub publishers: BTreeMap<String, PublisherCounts>,
}

impl ExtractionReport {
    pub fn has_document_failures(&self) -> bool {
        !self.document_failures.is_empty()
    }
}

/// Run the whole pipeline.
pub fn run_extraction(
    options: &ExtractionOptions,
    repository: &dyn StateRepository,
) -> Result<ExtractionReport> {
    let span = info_span!("extract", source = %options.source_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let context = load_context(&options.classification_csv, &options.subject_headings_csv)?;
    let prior = load_prior_state(repository, &options.output);

    let documents = discover_documents(&options.source_dir)
        .with_context(|| format!("discover documents in {}", options.source_dir.display()))?;
    info!(document_count = documents.len(), "discovered documents");

    let report = extract_documents(&documents, &context, &prior);

    if options.dry_run {
        info!("dry run, leaving state and output untouched");
    } else {
        repository.save(&report.state).context("save state")?;
        write_book_table(&options.output, &report.books)
            .with_context(|| format!("write {}", options.output.display()))?;
    }

    info!(
        books = report.books.len(),
        invalid = report.record_failures.len(),
        failed_documents = report.document_failures.len(),
        unsupported = report.unsupported,
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    Ok(report)
}

/// Build the shared lookup services from their sheets.
pub fn load_context(classification: &Path, subject_headings: &Path) -> Result<ExtractionContext> {
    let table = load_classification_table(classification)
        .with_context(|| format!("load classification sheet {}", classification.display()))?;
    let phrases = load_subject_phrases(subject_headings)
        .with_context(|| format!("load subject headings {}", subject_headings.display()))?;
    info!(
        classification_rows = table.len(),
        phrase_rules = phrases.len(),
        "loaded lookup sheets"
    );
    Ok(ExtractionContext::new(table, phrases))
}

/// Process documents in order and reconcile against `prior`.
pub fn extract_documents(
    documents: &[SourceDocument],
    context: &ExtractionContext,
    prior: &PriorState,
) -> ExtractionReport {
    let mut report = ExtractionReport::default();
    let mut reconciler = Reconciler::new(prior);

    for document in documents {
        let span = info_span!("document", file = %document.file_name, publisher = %document.publisher);
        let _guard = span.enter();
        let counts = report
            .publishers
            .entry(document.publisher.clone())
            .or_default();
        counts.documents += 1;

        let records = match read_products(document) {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "skipping document");
                counts.failed_documents += 1;
                report.document_failures.push(DocumentFailure {
                    path: document.path.clone(),
                    message: error.to_string(),
                });
                continue;
            }
        };

        for record in &records {
            counts.products += 1;
            let Some(adapter) = VersionAdapter::for_release(&record.release) else {
                debug!(release = %record.release, "unsupported release, skipping product");
                counts.unsupported += 1;
                report.unsupported += 1;
                continue;
            };

            match adapter.extract(record, context) {
                Ok(book) => {
                    counts.extracted += 1;
                    report.books.push(reconciler.merge(book, record));
                }
                Err(failure) => {
                    warn!(
                        origin = %record.origin_file_path,
                        isbn = failure.isbn.as_deref().unwrap_or("<unknown>"),
                        fields = ?failure.fields(),
                        "dropping invalid record"
                    );
                    counts.invalid += 1;
                    report.record_failures.push(RecordFailure {
                        origin_file_path: record.origin_file_path.clone(),
                        isbn: failure.isbn,
                        issues: failure.issues,
                    });
                }
            }
        }
    }

    report.state = reconciler.into_state();
    report
}
