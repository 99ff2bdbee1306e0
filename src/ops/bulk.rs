//! Multi-row deletes and moves, plus folder creation.
//!
//! Batches go to the store as one atomic request. A batch that fails, or
//! that reports success with no results, is an error and nothing in it
//! should be assumed applied.

use super::queries::{folder_name_taken, is_visible};
use crate::domain::{
    ID_ROOT_FOLDER, NoteKind, Row, Values, columns::note, is_system_folder,
};
use crate::infra::now_millis;
use crate::model::{NoteError, NoteResult};
use crate::store::{Filter, Operation, Query, RecordStore, StoreError, Table};

fn run_batch(action: &'static str, store: &dyn RecordStore, ops: &[Operation]) -> NoteResult<usize> {
    let results = store.apply_batch(ops).map_err(|e| {
        tracing::error!(action, count = ops.len(), error = %e, "batch failed");
        NoteError::Store(e)
    })?;
    if results.is_empty() {
        tracing::error!(action, count = ops.len(), "batch returned no results");
        return Err(StoreError::EmptyBatchResult.into());
    }
    Ok(results.iter().map(|r| r.rows_affected).sum())
}

fn move_values(dest_folder_id: i64, origin_parent_id: i64) -> Values {
    Row::new()
        .with(note::PARENT_ID, dest_folder_id)
        .with(note::ORIGIN_PARENT_ID, origin_parent_id)
        .with(note::LOCAL_MODIFIED, 1i64)
        .into_values()
}

/// Deletes notes and folders in one atomic batch.
///
/// The reserved folder ids (root, temporary, call record, trash) are
/// skipped; any other id is passed through. When nothing is left to delete,
/// including a list of only reserved ids, the call returns `Ok(0)` without
/// touching the store rather than failing. Returns the number of rows
/// deleted.
pub fn batch_delete(store: &dyn RecordStore, ids: &[i64]) -> NoteResult<usize> {
    let ops: Vec<Operation> = ids
        .iter()
        .copied()
        .filter(|&id| {
            if is_system_folder(id) {
                tracing::warn!(id, "skipping system folder in batch delete");
                return false;
            }
            true
        })
        .map(|id| Operation::delete(Table::Note, id))
        .collect();

    if ops.is_empty() {
        tracing::debug!("batch delete has nothing to do");
        return Ok(0);
    }
    run_batch("delete", store, &ops)
}

/// Moves notes into a folder in one atomic batch.
///
/// Each row keeps its previous parent in `origin_parent_id` and is flagged
/// locally modified. Ids with no row, and system folders, are skipped.
/// Returns the number of rows moved.
///
/// The prior parents are read one row at a time before the batch runs and
/// outside its transaction, so a move that lands in between can leave
/// `origin_parent_id` stale.
pub fn batch_move(store: &dyn RecordStore, ids: &[i64], dest_folder_id: i64) -> NoteResult<usize> {
    let mut ops = Vec::with_capacity(ids.len());
    for &id in ids {
        if is_system_folder(id) {
            tracing::warn!(id, "skipping system folder in batch move");
            continue;
        }
        let prior = store.query_one(
            Table::Note,
            &Query::select(&[note::PARENT_ID]).filter(Filter::by_id(id)),
        )?;
        let Some(prior) = prior else {
            tracing::warn!(id, "skipping missing note in batch move");
            continue;
        };
        let origin = prior.get_i64(note::PARENT_ID).unwrap_or(ID_ROOT_FOLDER);
        ops.push(Operation::update(
            Table::Note,
            id,
            move_values(dest_folder_id, origin),
        ));
    }

    if ops.is_empty() {
        tracing::debug!(dest_folder_id, "batch move has nothing to do");
        return Ok(0);
    }
    run_batch("move", store, &ops)
}

/// Moves a single note without a batch.
pub fn move_single(
    store: &dyn RecordStore,
    id: i64,
    src_folder_id: i64,
    dest_folder_id: i64,
) -> NoteResult<()> {
    if id <= 0 {
        return Err(NoteError::invalid_id("note", id));
    }
    let rows = store
        .update(Table::Note, id, &move_values(dest_folder_id, src_folder_id))
        .map_err(|e| {
            tracing::error!(id, error = %e, "move failed");
            NoteError::Store(e)
        })?;
    if rows == 0 {
        return Err(NoteError::NotFound { what: "note", id });
    }
    Ok(())
}

fn checked_folder_name(store: &dyn RecordStore, name: &str) -> NoteResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NoteError::InvalidArgument("folder name is empty".into()));
    }
    if folder_name_taken(store, name)? {
        return Err(NoteError::InvalidArgument(format!(
            "folder '{name}' already exists"
        )));
    }
    Ok(name.to_string())
}

/// Creates a folder under the root and returns its id.
///
/// The name is trimmed and must not match another folder outside the trash.
pub fn create_folder(store: &dyn RecordStore, name: &str) -> NoteResult<i64> {
    let name = checked_folder_name(store, name)?;
    let now = now_millis();
    let values = Row::new()
        .with(note::PARENT_ID, ID_ROOT_FOLDER)
        .with(note::TYPE, NoteKind::Folder.code())
        .with(note::SNIPPET, name.as_str())
        .with(note::CREATED_DATE, now)
        .with(note::MODIFIED_DATE, now)
        .into_values();
    let id = store.insert(Table::Note, &values)?;
    if id <= 0 {
        return Err(NoteError::MalformedId {
            context: "folder insert",
            id,
        });
    }
    tracing::debug!(id, name = %name, "created folder");
    Ok(id)
}

/// Renames a visible user folder.
pub fn rename_folder(store: &dyn RecordStore, folder_id: i64, name: &str) -> NoteResult<()> {
    if !is_visible(store, folder_id, NoteKind::Folder)? {
        return Err(NoteError::NotFound {
            what: "folder",
            id: folder_id,
        });
    }
    let name = checked_folder_name(store, name)?;
    let values = Row::new()
        .with(note::SNIPPET, name)
        .with(note::MODIFIED_DATE, now_millis())
        .with(note::LOCAL_MODIFIED, 1i64)
        .into_values();
    store.update(Table::Note, folder_id, &values)?;
    Ok(())
}
