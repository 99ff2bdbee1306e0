//! Move, trash, and delete command handlers.

use anyhow::{Context, Result, bail};
use std::sync::Arc;

use crate::cli::{MvArgs, RmArgs, TrashArgs};
use crate::domain::{ID_CALL_RECORD_FOLDER, ID_ROOT_FOLDER, ID_TRASH_FOLDER, NoteKind};
use crate::ops::{batch_delete, batch_move, is_visible};
use crate::store::RecordStore;

fn move_to(store: &Arc<dyn RecordStore>, ids: &[i64], dest: i64) -> Result<usize> {
    batch_move(store.as_ref(), ids, dest)
        .with_context(|| format!("failed to move {} item(s) to folder {dest}", ids.len()))
}

pub fn handle_mv(args: &MvArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    let builtin = matches!(
        args.dest,
        ID_ROOT_FOLDER | ID_CALL_RECORD_FOLDER | ID_TRASH_FOLDER
    );
    if !builtin && !is_visible(store.as_ref(), args.dest, NoteKind::Folder)? {
        bail!("folder not found: {}", args.dest);
    }
    if args.ids.contains(&args.dest) {
        bail!("cannot move folder {} into itself", args.dest);
    }
    let moved = move_to(store, &args.ids, args.dest)?;
    println!("Moved {moved} item(s) to folder {}", args.dest);
    Ok(())
}

pub fn handle_trash(args: &TrashArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    let moved = move_to(store, &args.ids, ID_TRASH_FOLDER)?;
    println!("Moved {moved} item(s) to trash");
    Ok(())
}

pub fn handle_rm(args: &RmArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    let deleted = batch_delete(store.as_ref(), &args.ids)
        .with_context(|| format!("failed to delete {} item(s)", args.ids.len()))?;
    println!("Deleted {deleted} item(s)");
    Ok(())
}
