//! Error type for the write model and bulk operations.

use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by note sessions, aggregates, and bulk operations.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Caller passed a malformed argument, such as a non-positive id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A row required by a read does not exist.
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: i64 },

    /// The store rejected or failed an operation.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// The store handed back an id that cannot identify a row.
    #[error("store returned malformed id {id} for {context}")]
    MalformedId { context: &'static str, id: i64 },

    /// `save` found nothing worth writing (deleted, empty, or unchanged).
    #[error("nothing to save")]
    NotWorthSaving,
}

impl NoteError {
    pub(crate) fn invalid_id(what: &str, id: i64) -> Self {
        NoteError::InvalidArgument(format!("{what} id must be positive, got {id}"))
    }

    /// True when the failure happened after writes may have started.
    ///
    /// Callers should reload from the store before editing further.
    pub fn is_state_unknown(&self) -> bool {
        matches!(self, NoteError::Store(_) | NoteError::MalformedId { .. })
    }
}

/// Result type for note operations.
pub type NoteResult<T> = Result<T, NoteError>;
