use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level problem with a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Output column name of the field.
    pub field: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: "required".to_string(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// A product record that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("record {} failed validation: {}", .isbn.as_deref().unwrap_or("<no isbn>"), join_issues(&.issues))]
pub struct ValidationFailure {
    /// ISBN of the record, when it could be read.
    pub isbn: Option<String>,
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|issue| issue.field.as_str()).collect()
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
