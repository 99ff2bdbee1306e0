//! List and Folders command handlers.

use anyhow::{Result, bail};
use std::sync::Arc;

use super::truncate_str;
use crate::cli::output::{Output, OutputFormat};
use crate::cli::{FoldersArgs, ListArgs};
use crate::domain::{ID_CALL_RECORD_FOLDER, ID_ROOT_FOLDER, ID_TRASH_FOLDER, NoteKind};
use crate::infra::format_millis;
use crate::ops::{NoteCatalog, first_line_of, is_visible};
use crate::store::RecordStore;

const SNIPPET_WIDTH: usize = 60;

pub fn handle_list(args: &ListArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    let folder = args.folder.unwrap_or(ID_ROOT_FOLDER);
    let builtin = matches!(folder, ID_ROOT_FOLDER | ID_CALL_RECORD_FOLDER | ID_TRASH_FOLDER);
    if !builtin && !is_visible(store.as_ref(), folder, NoteKind::Folder)? {
        bail!("folder not found: {folder}");
    }

    let notes = NoteCatalog::new(store.as_ref()).notes_in(folder)?;
    match args.format {
        OutputFormat::Json => Output::new(notes).print_json()?,
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            }
            for note in &notes {
                println!(
                    "{:>6}  {}  {}",
                    note.id,
                    format_millis(note.modified_date, "%Y-%m-%d"),
                    truncate_str(first_line_of(&note.snippet), SNIPPET_WIDTH)
                );
            }
        }
    }
    Ok(())
}

pub fn handle_folders(args: &FoldersArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    let folders = NoteCatalog::new(store.as_ref()).folders()?;
    match args.format {
        OutputFormat::Json => Output::new(folders).print_json()?,
        OutputFormat::Human => {
            for folder in &folders {
                println!("{:>6}  {} ({})", folder.id, folder.name, folder.note_count);
            }
        }
    }
    Ok(())
}
