//! Command handlers for the CLI.

mod completions;
mod export;
mod folders;
mod list;
mod mv;
mod new;
mod settings;
mod show_edit;


use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::cli::config::Config;
use crate::model::{NoteError, WorkingSession};
use crate::store::{RecordStore, SqliteStore};

// Re-export public items
pub use completions::handle_completions;
pub use export::handle_export;
pub use folders::{handle_mkdir, handle_rename};
pub use list::{handle_folders, handle_list};
pub use mv::{handle_mv, handle_rm, handle_trash};
pub use new::handle_new;
pub use settings::{handle_alert, handle_call, handle_checklist, handle_color};
pub use show_edit::{handle_edit, handle_show};

// ===========================================
// Shared Utilities
// ===========================================

/// Opens (creating if needed) the store at `path`.
pub fn open_store(path: &Path) -> Result<Arc<dyn RecordStore>> {
    let store = SqliteStore::open(path)
        .with_context(|| format!("failed to open store at {}", path.display()))?;
    Ok(Arc::new(store))
}

/// Loads a note for editing, applying the configured commit policy.
pub(crate) fn load_session(
    store: &Arc<dyn RecordStore>,
    id: i64,
    config: &Config,
) -> Result<WorkingSession> {
    let session = WorkingSession::load(store.clone(), id)
        .with_context(|| format!("failed to load note {id}"))?;
    Ok(session.with_commit_policy(config.commit_policy()))
}

/// Saves a session. Returns `false` when there was nothing to write.
pub(crate) fn save_session(session: &WorkingSession) -> Result<bool> {
    match session.save() {
        Ok(()) => Ok(true),
        Err(NoteError::NotWorthSaving) => Ok(false),
        Err(e) => {
            let id = session.note_id();
            Err(e).with_context(|| format!("failed to save note {id}"))
        }
    }
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
