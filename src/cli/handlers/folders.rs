//! Folder creation and renaming.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::cli::{MkdirArgs, RenameArgs};
use crate::ops::{create_folder, rename_folder};
use crate::store::RecordStore;

pub fn handle_mkdir(args: &MkdirArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    let id = create_folder(store.as_ref(), &args.name)
        .with_context(|| format!("failed to create folder '{}'", args.name))?;
    println!("Created folder {id}");
    Ok(())
}

pub fn handle_rename(args: &RenameArgs, store: &Arc<dyn RecordStore>) -> Result<()> {
    rename_folder(store.as_ref(), args.folder, &args.name)
        .with_context(|| format!("failed to rename folder {}", args.folder))?;
    println!("Renamed folder {} to '{}'", args.folder, args.name.trim());
    Ok(())
}
