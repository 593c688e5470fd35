//! Free-text subject phrase matching.

use std::path::Path;

use onix_model::SubjectPhraseRule;

use crate::csv_utils::{cell, read_sheet};
use crate::error::Result;

const TAG_SEPARATOR: &str = ", ";

/// Ordered list of phrase rules matched against free text.
#[derive(Debug, Clone, Default)]
pub struct SubjectPhraseMatcher {
    rules: Vec<SubjectPhraseRule>,
}

impl SubjectPhraseMatcher {
    /// Build a matcher; rules with an empty phrase or tag are dropped.
    pub fn new(rules: impl IntoIterator<Item = SubjectPhraseRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter(|rule| !rule.phrase.trim().is_empty() && !rule.tag.trim().is_empty())
            .collect();
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[SubjectPhraseRule] {
        &self.rules
    }

    /// Tags of every rule whose phrase occurs in `text`.
    ///
    /// Rules are tried in source order. Matching is a case-sensitive
    /// substring test. A tag is reported once, at its first firing rule.
    pub fn matching_tags<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let mut tags: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if text.contains(rule.phrase.as_str()) && !tags.contains(&rule.tag.as_str()) {
                tags.push(rule.tag.as_str());
            }
        }
        tags
    }

    /// Fired tags joined with `", "`; empty when nothing matches.
    pub fn match_text(&self, text: &str) -> String {
        self.matching_tags(text).join(TAG_SEPARATOR)
    }
}

/// Load phrase rules from the subject-heading sheet.
///
/// The first row is a header and is discarded. The first column of each
/// following row is the phrase, the second the tag.
pub fn load_subject_phrases(path: &Path) -> Result<SubjectPhraseMatcher> {
    let sheet = read_sheet(path)?;
    let rules: Vec<SubjectPhraseRule> = sheet
        .rows
        .iter()
        .map(|row| SubjectPhraseRule {
            phrase: row.first().cloned().unwrap_or_default(),
            tag: cell(row, 1).to_string(),
        })
        .collect();
    let matcher = SubjectPhraseMatcher::new(rules);
    tracing::debug!(
        path = %path.display(),
        rule_count = matcher.len(),
        "loaded subject phrase rules"
    );
    Ok(matcher)
}
