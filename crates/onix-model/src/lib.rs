pub mod book;
pub mod classification;
pub mod lookup;
pub mod marker;
pub mod release;
pub mod state;
pub mod validation;

pub use book::{NormalizedBook, OUTPUT_COLUMNS, SELECTION_COLUMN};
pub use classification::{CategoryMatch, ClassificationRow, SubjectPhraseRule};
pub use lookup::HeaderIndex;
pub use release::{OnixBand, ReleaseVersion};
pub use state::{PersistedBookState, PersistedState};
pub use validation::{FieldIssue, ValidationFailure};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_lists_fields() {
        let failure = ValidationFailure {
            isbn: Some("9780000000001".to_string()),
            issues: vec![FieldIssue::missing("imprint"), FieldIssue::missing("BISAC")],
        };
        assert_eq!(failure.fields(), vec!["imprint", "BISAC"]);
        assert_eq!(
            failure.to_string(),
            "record 9780000000001 failed validation: imprint: required, BISAC: required"
        );
    }

    #[test]
    fn state_serializes_as_entry_pairs() {
        let mut state = PersistedState::new();
        state.insert(
            "9780000000001",
            PersistedBookState {
                origin_file_path: "./xml_metadata/Hachette/a.xml".to_string(),
                origin_file_name: "a.xml".to_string(),
                detected_version: 2,
                selected: true,
            },
        );
        let json = serde_json::to_string(&state).expect("serialize state");
        assert_eq!(
            json,
            r#"[["9780000000001",{"originFilePath":"./xml_metadata/Hachette/a.xml","originFileName":"a.xml","onixVer":2,"toCollect":"x"}]]"#
        );
        let round: PersistedState = serde_json::from_str(&json).expect("deserialize state");
        assert_eq!(round, state);
    }
}
