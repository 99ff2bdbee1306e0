//! Connection management for SqliteStore.

use super::SqliteStore;
use super::schema::{create_schema, register_functions};
use crate::store::{StoreError, StoreResult};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory store with the notes schema.
    ///
    /// This is useful for testing and for stores that don't need persistence.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist. Initializes the schema
    /// and seeds the system folders if this is a new database.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened note store");
        Self::init(conn)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        register_functions(&conn)?;
        create_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // ===========================================
    // Connection Access
    // ===========================================

    /// Runs a closure against the underlying connection.
    ///
    /// Holds the store lock for the duration of the call.
    #[cfg(test)]
    pub(crate) fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> T) -> T {
        let conn = self.lock();
        f(&conn)
    }
}
