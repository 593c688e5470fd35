//! Persisted run state storage.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use onix_model::PersistedState;

use crate::error::StateError;

/// Storage for the ISBN-keyed state carried between runs.
pub trait StateRepository {
    /// Load the last saved state; empty when nothing was saved yet.
    fn load(&self) -> Result<PersistedState, StateError>;

    /// Replace the stored state.
    fn save(&self, state: &PersistedState) -> Result<(), StateError>;
}

/// State kept in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonStateRepository {
    path: PathBuf,
}

impl JsonStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for JsonStateRepository {
    fn load(&self) -> Result<PersistedState, StateError> {
        if !self.path.exists() {
            return Ok(PersistedState::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StateError::io(&self.path, e))?;
        serde_json::from_str(&content).map_err(|source| StateError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StateError::io(parent, e))?;
        }
        let mut json = serde_json::to_string_pretty(state).map_err(|source| StateError::Json {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');
        fs::write(&self.path, json).map_err(|e| StateError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), entries = state.len(), "saved state");
        Ok(())
    }
}

/// Non-persistent repository, mainly for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    state: RefCell<PersistedState>,
    saves: Cell<usize>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: RefCell::new(state),
            saves: Cell::new(0),
        }
    }

    /// Copy of the currently stored state.
    pub fn snapshot(&self) -> PersistedState {
        self.state.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl StateRepository for InMemoryStateRepository {
    fn load(&self) -> Result<PersistedState, StateError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        *self.state.borrow_mut() = state.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use onix_model::PersistedBookState;
    use tempfile::TempDir;

    use super::*;

    fn sample_state() -> PersistedState {
        let mut state = PersistedState::new();
        state.insert(
            "9780000000017",
            PersistedBookState {
                origin_file_path: "xml_metadata/Harbor/feed.xml".to_string(),
                origin_file_name: "feed.xml".to_string(),
                detected_version: 2,
                selected: true,
            },
        );
        state
    }

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = TempDir::new().expect("tempdir");
        let repo = JsonStateRepository::new(dir.path().join("state.json"));
        assert!(repo.load().expect("load").is_empty());
    }

    #[test]
    fn saves_pretty_json_with_trailing_newline() {
        let dir = TempDir::new().expect("tempdir");
        let repo = JsonStateRepository::new(dir.path().join("data/state.json"));
        repo.save(&sample_state()).expect("save");

        let written = fs::read_to_string(repo.path()).expect("read");
        assert!(written.starts_with("[\n  [\n    \"9780000000017\",\n"));
        assert!(written.ends_with("]\n"));
        assert!(written.contains("\"toCollect\": \"x\""));
        assert_eq!(repo.load().expect("reload"), sample_state());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").expect("write");
        let err = JsonStateRepository::new(&path).load().expect_err("malformed");
        assert!(matches!(err, StateError::Json { .. }));
    }

    #[test]
    fn in_memory_repository_counts_saves() {
        let repo = InMemoryStateRepository::new();
        repo.save(&sample_state()).expect("save");
        assert_eq!(repo.save_count(), 1);
        assert_eq!(repo.load().expect("load"), sample_state());
    }
}
