//! Error types for ONIX source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or parsing source documents.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source root missing or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a document.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("failed to parse XML {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    /// The document root has no `Product` children.
    #[error("no Product records found in {path}")]
    NoProducts { path: PathBuf },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
