//! Publisher directory and document discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// An XML document found under a publisher directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Full path to the document.
    pub path: PathBuf,
    /// File name component, e.g. `catalog.xml`.
    pub file_name: String,
    /// Name of the publisher directory the document sits in.
    pub publisher: String,
}

impl SourceDocument {
    /// Path as recorded in persisted state.
    pub fn origin_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Lists every `.xml` document one level below each publisher directory.
///
/// Publisher directories are visited in name order, and files inside a
/// directory in name order. Plain files at the root are ignored.
pub fn discover_documents(root: &Path) -> Result<Vec<SourceDocument>> {
    if !root.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut publishers: Vec<PathBuf> = read_entries(root)?
        .into_iter()
        .filter(|path| path.is_dir())
        .collect();
    publishers.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut documents = Vec::new();
    for dir in publishers {
        let publisher = file_name_of(&dir);
        let mut files: Vec<PathBuf> = read_entries(&dir)?
            .into_iter()
            .filter(|path| path.is_file() && has_xml_extension(path))
            .collect();
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        tracing::debug!(
            publisher = %publisher,
            document_count = files.len(),
            "discovered publisher directory"
        );

        documents.extend(files.into_iter().map(|path| SourceDocument {
            file_name: file_name_of(&path),
            publisher: publisher.clone(),
            path,
        }));
    }
    Ok(documents)
}

fn read_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }
    Ok(paths)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
