//! SQLite-backed record store.

mod connection;
mod schema;
mod store_impl;
mod transaction;

#[cfg(test)]
mod tests;

use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

pub use schema::{create_schema, get_schema_version};
pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed record store.
///
/// The connection sits behind a mutex so one store can be shared between
/// editing sessions on different threads.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Locks the connection, recovering it if a previous holder panicked.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
