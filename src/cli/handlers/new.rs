//! New note command handler.

use anyhow::{Result, bail};
use std::sync::Arc;

use super::save_session;
use crate::cli::NewArgs;
use crate::cli::config::Config;
use crate::domain::{
    CHECKLIST_MODE, ID_CALL_RECORD_FOLDER, ID_ROOT_FOLDER, INVALID_WIDGET_ID, NoteKind, WidgetType,
};
use crate::model::WorkingSession;
use crate::ops::is_visible;
use crate::store::RecordStore;

/// Creates a note and returns its id.
pub(crate) fn create_note(
    store: &Arc<dyn RecordStore>,
    args: &NewArgs,
    config: &Config,
) -> Result<i64> {
    if args.text.trim().is_empty() {
        bail!("note text cannot be empty");
    }
    let builtin = matches!(args.folder, ID_ROOT_FOLDER | ID_CALL_RECORD_FOLDER);
    if !builtin && !is_visible(store.as_ref(), args.folder, NoteKind::Folder)? {
        bail!("folder not found: {}", args.folder);
    }

    let session = WorkingSession::create(
        store.clone(),
        args.folder,
        INVALID_WIDGET_ID,
        WidgetType::Invalid,
        args.color.unwrap_or_else(|| config.default_bg_color()),
    )
    .with_commit_policy(config.commit_policy());
    session.set_content(&args.text);
    if args.checklist {
        session.set_checklist_mode(CHECKLIST_MODE);
    }
    save_session(&session)?;
    Ok(session.note_id())
}

pub fn handle_new(args: &NewArgs, store: &Arc<dyn RecordStore>, config: &Config) -> Result<()> {
    let id = create_note(store, args, config)?;
    println!("Created note {id}");
    Ok(())
}
