use serde::{Deserialize, Serialize};

/// One row of the classification-code sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRow {
    /// Classification code, compared case-insensitively.
    pub code: String,
    /// Slash-delimited category hierarchy, e.g. `FICTION / Mystery & Detective / General`.
    pub category_path: String,
    /// Literal custom tag for this code, if any.
    pub custom_category: Option<String>,
}

/// One row of the subject-heading sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectPhraseRule {
    /// Case-sensitive substring to search for.
    pub phrase: String,
    /// Label emitted when the phrase occurs.
    pub tag: String,
}

/// Categories derived from a classification code.
///
/// All fields are empty when the code is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub primary: String,
    pub secondary: String,
    pub custom_tag: String,
}

impl CategoryMatch {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty() && self.custom_tag.is_empty()
    }
}
