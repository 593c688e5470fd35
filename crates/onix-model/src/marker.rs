//! Serde helper for the `"x"` / `""` selection marker.
//!
//! The output table and the persisted state both store selection as a
//! string cell that a user edits by hand. Any non-blank cell counts as
//! selected when reading; writing always produces `"x"` or `""`.

use serde::{Deserialize, Deserializer, Serializer};

/// Marker written for a selected book.
pub const SELECTED: &str = "x";

/// Returns true when a hand-edited selection cell marks the book.
pub fn is_marked(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Marker text for a selection flag.
pub fn as_marker(selected: bool) -> &'static str {
    if selected { SELECTED } else { "" }
}

pub fn serialize<S>(selected: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(as_marker(*selected))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().is_some_and(is_marked))
}
