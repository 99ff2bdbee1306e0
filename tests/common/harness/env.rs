//! Isolated test environment with temp directory.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use super::{NotesCommand, TestNote};
use notestore::ops::create_folder;
use notestore::store::{RecordStore, SqliteStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Isolated test environment with a temporary store and export directory.
///
/// Everything lives in one temp directory that is removed on drop. The
/// config path points at a file that does not exist until
/// [`write_config`](Self::write_config) is called, so the user's real
/// config never leaks into a test.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        std::fs::create_dir_all(root.join("exports")).expect("Failed to create export dir");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the temp directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the store database.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("notes.db")
    }

    /// Returns the path of the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Returns the export directory.
    pub fn export_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    /// Opens the store directly, bypassing the CLI.
    pub fn store(&self) -> Arc<dyn RecordStore> {
        Arc::new(SqliteStore::open(&self.db_path()).expect("Failed to open store"))
    }

    /// Adds a test note and returns its id.
    pub fn add_note(&self, note: &TestNote) -> i64 {
        note.save(self.store())
    }

    /// Adds a folder and returns its id.
    pub fn add_folder(&self, name: &str) -> i64 {
        create_folder(self.store().as_ref(), name).expect("Failed to create folder")
    }

    /// Writes the config file.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.config_path(), contents).expect("Failed to write config");
    }

    /// Creates a NotesCommand configured for this test environment.
    pub fn cmd(&self) -> NotesCommand {
        NotesCommand::new()
            .db(&self.db_path())
            .config(&self.config_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notestore::ops::exists;

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir());
        assert!(env.export_dir().is_dir());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_persists() {
        let env = TestEnv::new();
        let id = env.add_note(&TestNote::new("Persisted"));
        assert!(id > 0);
        assert!(exists(env.store().as_ref(), id).unwrap());
    }

    #[test]
    fn test_env_cmd_points_at_store_and_config() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[2], "--config");
    }
}
