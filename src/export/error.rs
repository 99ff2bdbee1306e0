use crate::model::NoteError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during text export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export directory does not exist: {path}")]
    NoDirectory { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read notes: {0}")]
    Store(#[from] NoteError),
}
