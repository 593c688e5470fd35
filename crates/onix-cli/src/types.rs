use std::path::PathBuf;

use onix_core::ExtractionReport;

/// Outcome of the `extract` command.
#[derive(Debug)]
pub struct ExtractResult {
    pub report: ExtractionReport,
    pub output: PathBuf,
    pub state: PathBuf,
    pub dry_run: bool,
}

impl ExtractResult {
    /// Document failures make the process exit non-zero; invalid records do not.
    pub fn has_errors(&self) -> bool {
        self.report.has_document_failures()
    }
}
