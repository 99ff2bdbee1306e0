//! SQLite schema creation for the note store.

use crate::domain::ContentKind;
use crate::infra::phone_numbers_equal;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

/// Current schema version recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the note store.
///
/// Idempotent: calling it on an existing database is safe and does not
/// re-seed or duplicate anything.
///
/// # Tables Created
/// - `note` - Notes, user folders, and the reserved system folders
/// - `data` - Content records (text bodies, call metadata) owned by notes
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    // ===========================================
    // Note Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS note (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER NOT NULL DEFAULT 0,
            alert_date INTEGER NOT NULL DEFAULT 0,
            bg_color_id INTEGER NOT NULL DEFAULT 0,
            created_date INTEGER NOT NULL DEFAULT 0,
            modified_date INTEGER NOT NULL DEFAULT 0,
            snippet TEXT NOT NULL DEFAULT '',
            type INTEGER NOT NULL DEFAULT 0,
            widget_id INTEGER NOT NULL DEFAULT 0,
            widget_type INTEGER NOT NULL DEFAULT -1,
            local_modified INTEGER NOT NULL DEFAULT 0,
            origin_parent_id INTEGER NOT NULL DEFAULT 0
        );",
    )?;

    // ===========================================
    // Data Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS data (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            mime_type TEXT NOT NULL,
            note_id INTEGER NOT NULL REFERENCES note(id) ON DELETE CASCADE,
            created_date INTEGER NOT NULL DEFAULT 0,
            modified_date INTEGER NOT NULL DEFAULT 0,
            content TEXT NOT NULL DEFAULT '',
            data1 INTEGER,
            data2 INTEGER,
            data3 TEXT,
            data4 TEXT
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_note_parent ON note(parent_id);
         CREATE INDEX IF NOT EXISTS idx_note_modified ON note(modified_date);
         CREATE INDEX IF NOT EXISTS idx_data_note ON data(note_id);",
    )?;

    // ===========================================
    // System Folders
    // ===========================================
    // type 2 = system; ids match the reserved folder constants
    conn.execute_batch(
        "INSERT OR IGNORE INTO note (id, parent_id, type) VALUES (0, 0, 2);
         INSERT OR IGNORE INTO note (id, parent_id, type) VALUES (-1, 0, 2);
         INSERT OR IGNORE INTO note (id, parent_id, type) VALUES (-2, 0, 2);
         INSERT OR IGNORE INTO note (id, parent_id, type) VALUES (-3, 0, 2);",
    )?;

    // ===========================================
    // Snippet Triggers
    // ===========================================
    // The note snippet mirrors the body of its text content record.
    let text_mime = ContentKind::Text.mime_type();
    conn.execute_batch(&format!(
        "CREATE TRIGGER IF NOT EXISTS data_text_insert
        AFTER INSERT ON data WHEN NEW.mime_type = '{text_mime}' BEGIN
            UPDATE note SET snippet = NEW.content WHERE id = NEW.note_id;
        END;
        CREATE TRIGGER IF NOT EXISTS data_text_update
        AFTER UPDATE ON data WHEN NEW.mime_type = '{text_mime}' BEGIN
            UPDATE note SET snippet = NEW.content WHERE id = NEW.note_id;
        END;
        CREATE TRIGGER IF NOT EXISTS data_text_delete
        AFTER DELETE ON data WHEN OLD.mime_type = '{text_mime}' BEGIN
            UPDATE note SET snippet = '' WHERE id = OLD.note_id;
        END;"
    ))?;

    // Deleting a folder deletes the rows filed under it.
    conn.execute_batch(
        "CREATE TRIGGER IF NOT EXISTS folder_delete_children
        AFTER DELETE ON note WHEN OLD.type = 1 BEGIN
            DELETE FROM note WHERE parent_id = OLD.id;
        END;",
    )?;

    // ===========================================
    // Schema Version Table
    // ===========================================
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}

/// Registers the SQL functions filters rely on.
///
/// `phone_numbers_equal(a, b)` backs [`Condition::PhoneEq`](crate::store::Condition).
pub(crate) fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "phone_numbers_equal",
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let a: Option<String> = ctx.get(0)?;
            let b: Option<String> = ctx.get(1)?;
            Ok(match (a, b) {
                (Some(a), Some(b)) => phone_numbers_equal(&a, &b),
                _ => false,
            })
        },
    )
}
