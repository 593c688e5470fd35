use std::sync::Arc;

use onix_standards::{ClassificationTable, SubjectPhraseMatcher};

/// Read-only lookup services shared by every adapter call in a run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionContext {
    pub classification: Arc<ClassificationTable>,
    pub phrases: Arc<SubjectPhraseMatcher>,
}

impl ExtractionContext {
    pub fn new(classification: ClassificationTable, phrases: SubjectPhraseMatcher) -> Self {
        Self {
            classification: Arc::new(classification),
            phrases: Arc::new(phrases),
        }
    }
}
