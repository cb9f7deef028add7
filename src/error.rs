use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not reference a readable file.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input exists but is not a ZIP container.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// No archive entry matched the main document stream lookup.
    #[error("no entry containing {0:?} found in archive")]
    StreamNotFound(String),

    /// More than one entry matched and the lookup policy forbids guessing.
    #[error("several entries match {marker:?}: {candidates:?}")]
    AmbiguousStream {
        marker: String,
        candidates: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => Error::Io(io),
            other => Error::InvalidArchive(other.to_string()),
        }
    }
}
