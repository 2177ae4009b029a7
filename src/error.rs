//! Error types for scanning and exporting

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the scanner and the exporters.
#[derive(Debug, Error)]
pub enum Error {
    /// The scan root could not be read. Aborts the scan.
    #[error("cannot access '{}': {source}", .path.display())]
    NotAccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory below the root could not be listed.
    ///
    /// The scanner never returns this; it records it as an error entry and
    /// keeps walking.
    #[error("cannot read '{}': {source}", .path.display())]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing an export artifact failed.
    #[error("failed to export to '{}': {source}", .path.display())]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn not_accessible(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::NotAccessible {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn export_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ExportFailed {
            path: path.into(),
            source,
        }
    }
}
