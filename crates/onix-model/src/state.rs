//! State carried from one run to the next.

use std::collections::HashMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::marker;

/// Where a book came from and whether the user selected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedBookState {
    pub origin_file_path: String,
    pub origin_file_name: String,
    /// Integer major of the release the record was read with.
    #[serde(rename = "onixVer")]
    pub detected_version: u32,
    #[serde(rename = "toCollect", with = "marker", default)]
    pub selected: bool,
}

/// ISBN-keyed run state in first-seen order.
///
/// Inserting an ISBN that is already present replaces its value in place,
/// so the entry keeps its original position while the last write wins.
/// Serialized as an array of `[isbn, state]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    entries: Vec<(String, PersistedBookState)>,
    index: HashMap<String, usize>,
}

impl PersistedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, isbn: &str) -> Option<&PersistedBookState> {
        self.index.get(isbn).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.index.contains_key(isbn)
    }

    /// Insert or overwrite the entry for `isbn`, returning the previous value.
    pub fn insert(
        &mut self,
        isbn: impl Into<String>,
        state: PersistedBookState,
    ) -> Option<PersistedBookState> {
        let isbn = isbn.into();
        if let Some(&idx) = self.index.get(&isbn) {
            return Some(std::mem::replace(&mut self.entries[idx].1, state));
        }
        self.index.insert(isbn.clone(), self.entries.len());
        self.entries.push((isbn, state));
        None
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PersistedBookState)> {
        self.entries
            .iter()
            .map(|(isbn, state)| (isbn.as_str(), state))
    }

    /// ISBNs of all entries flagged as selected.
    pub fn selected_isbns(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, state)| state.selected)
            .map(|(isbn, _)| isbn)
    }
}

impl Serialize for PersistedState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PersistedState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(String, PersistedBookState)>::deserialize(deserializer)?;
        let mut state = Self::new();
        for (isbn, value) in entries {
            state.insert(isbn, value);
        }
        Ok(state)
    }
}
